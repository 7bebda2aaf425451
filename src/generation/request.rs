//! Generation requests and prompt composition

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// System prompt sent with every request
pub const SYSTEM_INSTRUCTION: &str = "\
You turn descriptions and pictures into small sculptures built from 1x1x1 toy bricks.
Respond with JSON only, shaped as {\"blocks\": [{\"x\": int, \"y\": int, \"z\": int, \"color\": \"#RRGGBB\"}]}.
The structure is centered on the origin and y points up.
Pick bright, saturated brick colors written as six-digit hex codes.
Approximate the requested object's silhouette and keep the bricks connected where possible.";

/// How many blocks the generator should aim for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Low,
    #[default]
    Medium,
    High,
}

impl Density {
    /// Largest absolute coordinate the generator is asked to use
    pub fn coordinate_bound(self) -> i32 {
        match self {
            Density::Low => 5,
            Density::Medium => 8,
            Density::High => 12,
        }
    }

    /// Prompt fragment describing the wanted level of detail
    pub fn instruction(self) -> String {
        let bound = self.coordinate_bound();
        match self {
            Density::Low => format!(
                "Keep it minimal with few bricks; every coordinate stays within -{bound} to {bound}."
            ),
            Density::Medium => format!(
                "Use a moderate amount of detail; coordinates generally stay within -{bound} to {bound}."
            ),
            Density::High => format!(
                "Make it dense and richly detailed with many bricks; coordinates may range from -{bound} to {bound}."
            ),
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Density::Low => "low",
            Density::Medium => "medium",
            Density::High => "high",
        })
    }
}

impl FromStr for Density {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Density::Low),
            "medium" => Ok(Density::Medium),
            "high" => Ok(Density::High),
            other => Err(Error::Validation(format!("unknown density {:?}", other))),
        }
    }
}

/// Uploaded reference image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self { bytes, mime_type: mime_type.into() }
    }

    /// Wrap raw file bytes, detecting the mime type from the image signature
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| Error::Validation(format!("unrecognized image data: {}", e)))?;
        Ok(Self::new(bytes, format.to_mime_type()))
    }

    /// Parse a `data:<mime>;base64,<payload>` URL
    pub fn from_data_url(url: &str) -> Result<Self> {
        let invalid = || Error::Validation("expected a base64 data URL".to_string());

        let rest = url.strip_prefix("data:").ok_or_else(invalid)?;
        let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
        let mime_type = header.strip_suffix(";base64").ok_or_else(invalid)?;
        if mime_type.is_empty() {
            return Err(invalid());
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| Error::Validation(format!("bad base64 image payload: {}", e)))?;
        Ok(Self::new(bytes, mime_type))
    }

    /// Base64 body for transport
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Inverse of [`ImagePayload::from_data_url`]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// One prompt-or-image generation request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationRequest {
    pub prompt: Option<String>,
    pub image: Option<ImagePayload>,
    pub density: Density,
}

impl GenerationRequest {
    pub fn from_prompt(prompt: impl Into<String>, density: Density) -> Self {
        Self {
            prompt: Some(prompt.into()),
            image: None,
            density,
        }
    }

    pub fn from_image(image: ImagePayload, density: Density) -> Self {
        Self {
            prompt: None,
            image: Some(image),
            density,
        }
    }

    /// Trimmed prompt text, if any is left after trimming
    pub fn prompt_text(&self) -> Option<&str> {
        self.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    /// A request needs a non-blank prompt or an image
    pub fn validate(&self) -> Result<()> {
        if self.prompt_text().is_none() && self.image.is_none() {
            return Err(Error::EmptyRequest);
        }
        Ok(())
    }

    /// User-facing name for the resulting build
    pub fn build_name(&self) -> String {
        self.prompt_text().unwrap_or("Image Build").to_string()
    }

    /// Instruction text sent alongside the system prompt.
    ///
    /// An image takes precedence over the prompt text.
    pub fn instruction_text(&self) -> String {
        let density = self.density.instruction();
        if self.image.is_some() {
            format!(
                "Study the attached picture and rebuild it as a brick sculpture, listing every brick's coordinates and color. {}",
                density
            )
        } else {
            format!(
                "Build this: {}. Interpret it creatively as a brick sculpture. {}",
                self.prompt_text().unwrap_or_default(),
                density
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_density_parse_and_bounds() {
        assert_eq!("HIGH".parse::<Density>().unwrap(), Density::High);
        assert!("extreme".parse::<Density>().is_err());
        assert!(Density::Low.coordinate_bound() < Density::Medium.coordinate_bound());
        assert!(Density::High.instruction().contains("-12 to 12"));
        assert_eq!(serde_json::to_string(&Density::Low).unwrap(), "\"low\"");
    }

    #[test]
    fn test_validate() {
        assert!(GenerationRequest::from_prompt("a red heart", Density::Low).validate().is_ok());
        assert!(matches!(
            GenerationRequest::from_prompt("   ", Density::Low).validate(),
            Err(Error::EmptyRequest)
        ));
        assert!(matches!(GenerationRequest::default().validate(), Err(Error::EmptyRequest)));

        let image = ImagePayload::new(PNG_SIGNATURE.to_vec(), "image/png");
        assert!(GenerationRequest::from_image(image, Density::High).validate().is_ok());
    }

    #[test]
    fn test_build_name_and_instruction() {
        let text = GenerationRequest::from_prompt("  castle ", Density::Medium);
        assert_eq!(text.build_name(), "castle");
        assert!(text.instruction_text().starts_with("Build this: castle."));

        let image = GenerationRequest::from_image(
            ImagePayload::new(PNG_SIGNATURE.to_vec(), "image/png"),
            Density::Low,
        );
        assert_eq!(image.build_name(), "Image Build");
        assert!(image.instruction_text().contains("attached picture"));
    }

    #[test]
    fn test_image_from_bytes_sniffs_mime() {
        let png = ImagePayload::from_bytes(PNG_SIGNATURE.to_vec()).unwrap();
        assert_eq!(png.mime_type, "image/png");

        let jpeg = ImagePayload::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10]).unwrap();
        assert_eq!(jpeg.mime_type, "image/jpeg");

        assert!(ImagePayload::from_bytes(b"plain text".to_vec()).is_err());
    }

    #[test]
    fn test_data_url() {
        let image = ImagePayload::new(vec![1, 2, 3, 250], "image/webp");
        let url = image.to_data_url();
        assert!(url.starts_with("data:image/webp;base64,"));
        assert_eq!(ImagePayload::from_data_url(&url).unwrap(), image);

        assert!(ImagePayload::from_data_url("image/png;base64,AAAA").is_err());
        assert!(ImagePayload::from_data_url("data:image/png,AAAA").is_err());
        assert!(ImagePayload::from_data_url("data:image/png;base64,@@@").is_err());
    }
}
