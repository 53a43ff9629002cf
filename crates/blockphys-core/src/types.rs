//! Block and material types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Unique identifier for a block type.
///
/// Block ID 0 is reserved for air (empty space).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockId(pub u16);

impl BlockId {
    /// Air block (empty space)
    pub const AIR: Self = Self(0);
    /// Stone block
    pub const STONE: Self = Self(1);
    /// Grass block
    pub const GRASS: Self = Self(2);
    /// Dirt block
    pub const DIRT: Self = Self(3);
    /// Cobblestone block
    pub const COBBLESTONE: Self = Self(4);
    /// Planks block
    pub const PLANKS: Self = Self(5);
    /// Sapling block
    pub const SAPLING: Self = Self(6);
    /// Bedrock block
    pub const BEDROCK: Self = Self(7);
    /// Flowing water
    pub const FLOWING_WATER: Self = Self(8);
    /// Still water
    pub const WATER: Self = Self(9);
    /// Flowing lava
    pub const FLOWING_LAVA: Self = Self(10);
    /// Still lava
    pub const LAVA: Self = Self(11);
    /// Sand block
    pub const SAND: Self = Self(12);
    /// Gravel block
    pub const GRAVEL: Self = Self(13);
    /// Log block
    pub const LOG: Self = Self(17);
    /// Glass block
    pub const GLASS: Self = Self(20);
    /// Iron block
    pub const IRON_BLOCK: Self = Self(42);
    /// Snow block
    pub const SNOW: Self = Self(80);
    /// Ice block
    pub const ICE: Self = Self(79);
    /// Packed ice block
    pub const PACKED_ICE: Self = Self(174);
    /// Slime block
    pub const SLIME: Self = Self(165);

    /// Returns true if this block is air (empty)
    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this block is water or lava, flowing or still
    #[inline]
    pub const fn is_fluid(self) -> bool {
        matches!(self.0, 8..=11)
    }

    /// Returns true if this block blocks movement (not air, not fluid)
    #[inline]
    pub const fn is_solid(self) -> bool {
        !self.is_air() && !self.is_fluid()
    }

    /// Surface material of this block, if it has one.
    pub const fn material(self) -> Option<Material> {
        let material = match self {
            Self::STONE | Self::COBBLESTONE | Self::BEDROCK => Material::Stone,
            Self::GRASS => Material::Grass,
            Self::DIRT => Material::Dirt,
            Self::PLANKS | Self::LOG | Self::SAPLING => Material::Wood,
            Self::SAND => Material::Sand,
            Self::GRAVEL => Material::Gravel,
            Self::GLASS => Material::Glass,
            Self::IRON_BLOCK => Material::Metal,
            Self::SNOW => Material::Snow,
            Self::ICE => Material::Ice,
            Self::PACKED_ICE => Material::PackedIce,
            Self::SLIME => Material::Slime,
            _ => return None,
        };
        Some(material)
    }
}

/// Physical material of a body or surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Stone,
    Dirt,
    Grass,
    Sand,
    Gravel,
    Wood,
    Ice,
    PackedIce,
    Snow,
    Metal,
    Glass,
    Rubber,
    Slime,
}

impl Material {
    /// Every material, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Stone,
        Self::Dirt,
        Self::Grass,
        Self::Sand,
        Self::Gravel,
        Self::Wood,
        Self::Ice,
        Self::PackedIce,
        Self::Snow,
        Self::Metal,
        Self::Glass,
        Self::Rubber,
        Self::Slime,
    ];

    /// Canonical lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stone => "stone",
            Self::Dirt => "dirt",
            Self::Grass => "grass",
            Self::Sand => "sand",
            Self::Gravel => "gravel",
            Self::Wood => "wood",
            Self::Ice => "ice",
            Self::PackedIce => "packed_ice",
            Self::Snow => "snow",
            Self::Metal => "metal",
            Self::Glass => "glass",
            Self::Rubber => "rubber",
            Self::Slime => "slime",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::InvalidMaterial(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_id_air() {
        assert!(BlockId::AIR.is_air());
        assert!(!BlockId::AIR.is_solid());
    }

    #[test]
    fn fluids_are_not_solid() {
        for id in [
            BlockId::FLOWING_WATER,
            BlockId::WATER,
            BlockId::FLOWING_LAVA,
            BlockId::LAVA,
        ] {
            assert!(id.is_fluid());
            assert!(!id.is_solid());
        }
        assert!(BlockId::STONE.is_solid());
    }

    #[test]
    fn block_materials() {
        assert_eq!(BlockId::ICE.material(), Some(Material::Ice));
        assert_eq!(BlockId::BEDROCK.material(), Some(Material::Stone));
        assert_eq!(BlockId::WATER.material(), None);
        assert_eq!(BlockId::AIR.material(), None);
    }

    #[test]
    fn material_parses_case_insensitive() {
        assert_eq!("Ice".parse::<Material>().unwrap(), Material::Ice);
        assert_eq!(" packed_ice ".parse::<Material>().unwrap(), Material::PackedIce);
        assert_eq!(
            "unobtainium".parse::<Material>().unwrap_err(),
            Error::InvalidMaterial("unobtainium".to_string())
        );
    }

    #[test]
    fn material_name_roundtrips() {
        for material in Material::ALL {
            assert_eq!(material.name().parse::<Material>().unwrap(), material);
        }
    }
}
