// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static value/label tables for the domain enums.
//!
//! Every selection enum is declared through [`labeled_enum!`], which
//! generates the persisted string form, the human label, parsing, and the
//! ordered option list used to build dropdowns. The presentation layer
//! never introspects types; it calls [`selection_options`].

use serde::Serialize;

/// One entry of a selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SelectionOption {
    /// The persisted/serialized value.
    pub value: &'static str,
    /// The human-readable label.
    pub label: &'static str,
}

/// Declares a closed enum together with its value/label table.
///
/// The generated type gets `ALL`, `as_str`, `label`, `options`,
/// `FromStr` (failing with `DomainError::InvalidEnumValue`) and `Display`.
/// Values must be the `snake_case` form of the variant so that serde and
/// `as_str` agree.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($value:literal, $label:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant
            ),+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the persisted string form.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Returns the human-readable label.
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Returns the ordered selection list for this enum.
            #[must_use]
            pub fn options() -> Vec<$crate::labels::SelectionOption> {
                Self::ALL
                    .iter()
                    .map(|v| $crate::labels::SelectionOption {
                        value: v.as_str(),
                        label: v.label(),
                    })
                    .collect()
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)+
                    _ => Err($crate::error::DomainError::InvalidEnumValue {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labeled_enum! {
    /// The enums that expose a selection list.
    pub enum SelectionKind ("selection kind") {
        SportType => ("sport_type", "Sport"),
        SurfaceType => ("surface_type", "Surface"),
        FacilityState => ("facility_state", "Facility state"),
        CustomerTier => ("customer_tier", "Customer tier"),
        ReservationState => ("reservation_state", "Reservation state"),
        ReservationChannel => ("reservation_channel", "Channel"),
        PaymentMethod => ("payment_method", "Payment method"),
    }
}

/// Looks up the selection list for an enum kind.
#[must_use]
pub fn selection_options(kind: SelectionKind) -> Vec<SelectionOption> {
    match kind {
        SelectionKind::SportType => crate::SportType::options(),
        SelectionKind::SurfaceType => crate::SurfaceType::options(),
        SelectionKind::FacilityState => crate::FacilityState::options(),
        SelectionKind::CustomerTier => crate::CustomerTier::options(),
        SelectionKind::ReservationState => crate::ReservationState::options(),
        SelectionKind::ReservationChannel => crate::ReservationChannel::options(),
        SelectionKind::PaymentMethod => crate::PaymentMethod::options(),
    }
}
