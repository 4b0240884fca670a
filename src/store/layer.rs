//! Column layer: a saved column order + widths, tagged with the column count
//! it was taken from.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Column count at the time the layer was taken
    pub signature: u32,
    /// Display order of logical columns
    pub order: Vec<u32>,
    /// Widths by display position
    pub widths: Vec<u32>,
}

impl Layer {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let layer: Layer = serde_json::from_slice(data)?;
        let len = layer.signature as usize;
        if layer.order.len() != len || layer.widths.len() != len {
            return Err(GridError::Layer(format!(
                "signature {} does not match {} order / {} width entries",
                layer.signature,
                layer.order.len(),
                layer.widths.len()
            )));
        }
        Ok(layer)
    }

    /// Text form for hosts that persist settings as strings.
    pub fn to_base64(&self) -> Result<String> {
        Ok(STANDARD.encode(self.to_bytes()?))
    }

    pub fn from_base64(text: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| GridError::Layer(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_form() {
        let layer = Layer {
            signature: 2,
            order: vec![1, 0],
            widths: vec![40, 90],
        };
        let text = layer.to_base64().unwrap();
        assert_eq!(Layer::from_base64(&text).unwrap(), layer);
    }

    #[test]
    fn test_inconsistent_blob_rejected() {
        let blob = br#"{"signature":3,"order":[0,1],"widths":[10,10]}"#;
        assert!(matches!(Layer::from_bytes(blob), Err(GridError::Layer(_))));
        assert!(matches!(
            Layer::from_bytes(b"not json"),
            Err(GridError::Json(_))
        ));
    }
}
