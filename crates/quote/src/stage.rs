use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::Direction;

/// Position in the fulfilment pipeline. Declaration order is pipeline order.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Stage {
    #[default]
    #[serde(rename = "Cotización Confirmada", alias = "CotizacionConfirmada")]
    #[strum(to_string = "Cotización Confirmada", serialize = "CotizacionConfirmada")]
    CotizacionConfirmada,
    Despacho,
    #[serde(rename = "Tránsito", alias = "Transito")]
    #[strum(to_string = "Tránsito", serialize = "Transito")]
    Transito,
    Entregado,
}

impl Stage {
    pub const FIRST: Stage = Stage::CotizacionConfirmada;
    pub const LAST: Stage = Stage::Entregado;

    pub fn index(self) -> usize {
        match self {
            Stage::CotizacionConfirmada => 0,
            Stage::Despacho => 1,
            Stage::Transito => 2,
            Stage::Entregado => 3,
        }
    }

    /// Pipeline identifier, as written in history notes.
    pub fn name(self) -> &'static str {
        match self {
            Stage::CotizacionConfirmada => "CotizacionConfirmada",
            Stage::Despacho => "Despacho",
            Stage::Transito => "Transito",
            Stage::Entregado => "Entregado",
        }
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        Stage::VARIANTS.get(index).copied()
    }

    /// Neighbour in `direction`, clamped to the pipeline ends.
    pub fn step(self, direction: Direction) -> Stage {
        let index = self
            .index()
            .saturating_add_signed(direction.offset())
            .min(Stage::LAST.index());

        Stage::from_index(index).unwrap_or(self)
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::LAST
    }
}
