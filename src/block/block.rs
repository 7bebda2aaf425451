//! Single block placement

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::Error;
use crate::core::types::IVec3;
use super::color::BlockColor;

/// One unit cube at an integer lattice position.
///
/// Serialized flat as `{"x":0,"y":0,"z":0,"color":"#FF0000"}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: BlockColor,
}

impl Block {
    pub fn new(x: i32, y: i32, z: i32, color: BlockColor) -> Self {
        Self { x, y, z, color }
    }

    /// Create a block at a lattice position
    pub fn at(position: IVec3, color: BlockColor) -> Self {
        Self::new(position.x, position.y, position.z, color)
    }

    /// Lattice position, the block's identity within a set
    pub fn position(&self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// Validate one entry of untrusted generator output.
    pub fn from_raw(raw: &Value) -> Result<Self, Error> {
        let obj = raw
            .as_object()
            .ok_or_else(|| Error::Validation(format!("expected a block object, got {}", raw)))?;

        let x = coordinate(obj, "x")?;
        let y = coordinate(obj, "y")?;
        let z = coordinate(obj, "z")?;

        let color = match obj.get("color") {
            Some(Value::String(s)) => BlockColor::parse(s)?,
            Some(other) => {
                return Err(Error::Validation(format!("color must be a string, got {}", other)));
            }
            None => return Err(Error::Validation("missing color".to_string())),
        };

        Ok(Self::new(x, y, z, color))
    }
}

/// Read an integer coordinate. Integral floats such as `2.0` are accepted.
fn coordinate(obj: &Map<String, Value>, axis: &str) -> Result<i32, Error> {
    let value = obj
        .get(axis)
        .ok_or_else(|| Error::Validation(format!("missing coordinate `{}`", axis)))?;

    if let Some(i) = value.as_i64() {
        return i32::try_from(i)
            .map_err(|_| Error::Validation(format!("coordinate `{}` out of range: {}", axis, i)));
    }

    match value.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => {
            if f >= i32::MIN as f64 && f <= i32::MAX as f64 {
                Ok(f as i32)
            } else {
                Err(Error::Validation(format!("coordinate `{}` out of range: {}", axis, f)))
            }
        }
        Some(f) => Err(Error::Validation(format!("coordinate `{}` is not an integer: {}", axis, f))),
        None => Err(Error::Validation(format!("coordinate `{}` is not a number: {}", axis, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position() {
        let block = Block::at(IVec3::new(1, 2, 3), BlockColor::rgb(1, 2, 3));
        assert_eq!(block.position(), IVec3::new(1, 2, 3));
        assert_eq!((block.x, block.y, block.z), (1, 2, 3));
    }

    #[test]
    fn test_from_raw_valid() {
        let block = Block::from_raw(&json!({"x": 1, "y": -2, "z": 3.0, "color": "#00ff00"})).unwrap();
        assert_eq!(block, Block::new(1, -2, 3, BlockColor::rgb(0, 255, 0)));
    }

    #[test]
    fn test_from_raw_rejects_malformed() {
        let cases = [
            json!([1, 2, 3]),
            json!({"x": 1, "y": 2, "color": "#FF0000"}),
            json!({"x": 1.5, "y": 2, "z": 0, "color": "#FF0000"}),
            json!({"x": "1", "y": 2, "z": 0, "color": "#FF0000"}),
            json!({"x": 1, "y": 2, "z": 0, "color": "red"}),
            json!({"x": 1, "y": 2, "z": 0, "color": 16711680}),
            json!({"x": 1, "y": 2, "z": 0}),
            json!({"x": 4_000_000_000i64, "y": 2, "z": 0, "color": "#FF0000"}),
        ];
        for raw in cases {
            let err = Block::from_raw(&raw).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{raw} gave {err:?}");
        }
    }

    #[test]
    fn test_serde_shape() {
        let block = Block::new(0, 1, 2, BlockColor::rgb(255, 0, 0));
        let value = serde_json::to_value(block).unwrap();
        assert_eq!(value, json!({"x": 0, "y": 1, "z": 2, "color": "#FF0000"}));
    }
}
