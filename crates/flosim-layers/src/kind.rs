//! The closed set of layers a basin can hold.

use crate::{ElevationLayer, Evaporation, Gutter, Rain, Reservoir};
use flosim_core::Dims;
use flosim_layer::{Contribution, ControlLayer, Drains, Fills, LayerContext, LayerError};
use std::fmt;

/// Any layer a basin can register.
///
/// The built-in variants cover rainfall, drainage, evaporation, reservoirs
/// and bed editing. `Custom` accepts any other [`ControlLayer`].
///
/// Capability accessors ([`as_fills_mut`](Layer::as_fills_mut),
/// [`as_drains_mut`](Layer::as_drains_mut), ...) let callers reconfigure a
/// layer after the basin has taken ownership of it.
pub enum Layer {
    /// See [`Rain`].
    Rain(Rain),
    /// See [`Gutter`].
    Gutter(Gutter),
    /// See [`Evaporation`].
    Evaporation(Evaporation),
    /// See [`Reservoir`].
    Reservoir(Reservoir),
    /// See [`ElevationLayer`].
    Elevation(ElevationLayer),
    /// A user-defined layer.
    Custom(Box<dyn ControlLayer>),
}

impl Layer {
    fn inner(&self) -> &dyn ControlLayer {
        match self {
            Self::Rain(l) => l,
            Self::Gutter(l) => l,
            Self::Evaporation(l) => l,
            Self::Reservoir(l) => l,
            Self::Elevation(l) => l,
            Self::Custom(l) => &**l,
        }
    }

    /// The layer's fill capability, if it has one.
    pub fn as_fills(&self) -> Option<&dyn Fills> {
        match self {
            Self::Rain(l) => Some(l),
            _ => None,
        }
    }

    /// Mutable fill capability, if the layer has one.
    pub fn as_fills_mut(&mut self) -> Option<&mut dyn Fills> {
        match self {
            Self::Rain(l) => Some(l),
            _ => None,
        }
    }

    /// The layer's drain capability, if it has one.
    pub fn as_drains(&self) -> Option<&dyn Drains> {
        match self {
            Self::Gutter(l) => Some(l),
            Self::Evaporation(l) => Some(l),
            _ => None,
        }
    }

    /// Mutable drain capability, if the layer has one.
    pub fn as_drains_mut(&mut self) -> Option<&mut dyn Drains> {
        match self {
            Self::Gutter(l) => Some(l),
            Self::Evaporation(l) => Some(l),
            _ => None,
        }
    }

    /// The reservoir, if this is one.
    pub fn as_reservoir_mut(&mut self) -> Option<&mut Reservoir> {
        match self {
            Self::Reservoir(l) => Some(l),
            _ => None,
        }
    }

    /// The evaporation layer, if this is one.
    pub fn as_evaporation_mut(&mut self) -> Option<&mut Evaporation> {
        match self {
            Self::Evaporation(l) => Some(l),
            _ => None,
        }
    }

    /// The elevation layer, if this is one.
    pub fn as_elevation_mut(&mut self) -> Option<&mut ElevationLayer> {
        match self {
            Self::Elevation(l) => Some(l),
            _ => None,
        }
    }
}

impl ControlLayer for Layer {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn dims(&self) -> Dims {
        self.inner().dims()
    }

    fn tick(&self, ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        self.inner().tick(ctx)
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rain(l) => f.debug_tuple("Rain").field(l).finish(),
            Self::Gutter(l) => f.debug_tuple("Gutter").field(l).finish(),
            Self::Evaporation(l) => f.debug_tuple("Evaporation").field(l).finish(),
            Self::Reservoir(l) => f.debug_tuple("Reservoir").field(l).finish(),
            Self::Elevation(l) => f.debug_tuple("Elevation").field(l).finish(),
            Self::Custom(l) => f.debug_tuple("Custom").field(&l.name()).finish(),
        }
    }
}

impl From<Rain> for Layer {
    fn from(l: Rain) -> Self {
        Self::Rain(l)
    }
}

impl From<Gutter> for Layer {
    fn from(l: Gutter) -> Self {
        Self::Gutter(l)
    }
}

impl From<Evaporation> for Layer {
    fn from(l: Evaporation) -> Self {
        Self::Evaporation(l)
    }
}

impl From<Reservoir> for Layer {
    fn from(l: Reservoir) -> Self {
        Self::Reservoir(l)
    }
}

impl From<ElevationLayer> for Layer {
    fn from(l: ElevationLayer) -> Self {
        Self::Elevation(l)
    }
}

impl From<Box<dyn ControlLayer>> for Layer {
    fn from(l: Box<dyn ControlLayer>) -> Self {
        Self::Custom(l)
    }
}
