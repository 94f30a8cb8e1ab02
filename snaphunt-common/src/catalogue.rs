//! Location catalogue data model
//!
//! The catalogue is the fixed, ordered set of reference physical locations the
//! matcher can recognize. A location's position in the catalogue is its stable
//! caller-facing identifier: indices are contiguous (0..N-1) and must not
//! change for the lifetime of a loaded catalogue version, because callers
//! persist them verbatim.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One reference location in the quest catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Short human-readable label
    pub name: String,
    /// Free-text paragraph describing fixed, identifying visual features,
    /// written to discriminate against visually similar nearby scenes
    pub description: String,
    /// Reference image paths (catalogue metadata, e.g. for hint display;
    /// not sent to the model at match time)
    #[serde(default)]
    pub images: Vec<String>,
}

/// Ordered, immutable set of reference locations
///
/// Loaded once at process start and shared read-only across all concurrent
/// match requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalogue {
    locations: Vec<Location>,
}

impl Catalogue {
    /// Create a catalogue from an ordered list of locations
    ///
    /// # Errors
    /// Returns error if the list is empty (a matcher without reference
    /// locations can never produce a valid index).
    pub fn new(locations: Vec<Location>) -> Result<Self> {
        if locations.is_empty() {
            return Err(Error::Catalogue("catalogue must not be empty".to_string()));
        }
        Ok(Self { locations })
    }

    /// Load a catalogue from a JSON file (deployment-time override)
    ///
    /// Expects a JSON array of `{name, description, images}` objects in
    /// catalogue order.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let locations: Vec<Location> = serde_json::from_str(&content)
            .map_err(|e| Error::Catalogue(format!("parse {}: {}", path.display(), e)))?;
        Self::new(locations)
    }

    /// The built-in event catalogue
    pub fn builtin() -> Self {
        Self {
            locations: builtin_locations(),
        }
    }

    /// All locations in catalogue order
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Location at the given index, if in range
    pub fn get(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    /// Number of locations
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True when the catalogue holds no locations
    ///
    /// Unreachable through the constructors, which reject empty input.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

fn builtin_locations() -> Vec<Location> {
    fn loc(name: &str, description: &str, images: &[&str]) -> Location {
        Location {
            name: name.to_string(),
            description: description.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    vec![
        loc(
            "Cafe Truck",
            r#"This image features a paved park path with a unique, cream-colored three-wheeled "Arena Cafe" vehicle in the foreground, followed by a red Mercedes-Benz food truck. The background reveals a grassy area with people relaxing under trees, and a dense line of trees under a clear sky. The overall scene suggests a pleasant outdoor food vendor setup within a park setting."#,
            &["images/cafe-truck/1.jpg", "images/cafe-truck/2.jpg"],
        ),
        loc(
            "Coffee Break Lemur",
            r#"This image universally features a stylized, lemur-like cardboard cutout holding a "COFFEE BREAK" sign, set against a light-colored wall with purple lighting. Key fixed elements include a bright red door with a crash bar, a red fire extinguisher box, and the dark, tiered seating of what appears to be a stadium or arena in the background."#,
            &[
                "images/coffee-break-lemur/1.jpg",
                "images/coffee-break-lemur/2.jpg",
            ],
        ),
        loc(
            "Partners Zone Lemur",
            r#"A purple and white cartoon lemur cutout holds a "PARTNERS ZONE" sign, prominently featuring its large, stylized eyes and ringed tail. This unique mascot stands on a green floor next to a grey pillar, with a person partially visible in the background."#,
            &[
                "images/partners-zone-lemur/1.jpg",
                "images/partners-zone-lemur/2.jpg",
            ],
        ),
        loc(
            "Deer Statue",
            "This image uniquely displays a prominent, bright orange statue of a stag with large antlers, standing on a rectangular pedestal covered in artificial grass. To the right of the stag is a dark wooden structure, possibly a kiosk or small building, featuring multiple colorful signs with text, likely menus or information. In the background, a large, white, arched or dome-shaped building is visible under a bright, cloudy sky, with hints of green grass in the foreground.",
            &["images/deer-statue/1.jpg", "images/deer-statue/2.jpg"],
        ),
        loc(
            "RedBull stage with tetris game",
            "This indoor event space features a vibrant Red Bull Tetris promotional stand with cartoon figures, a drone, and a prominent QR code, all set against a backdrop of colorful Tetris blocks. The stand is framed by two tall, illuminated light blue block structures and rests on a distinctive green floor. People in casual attire are visible around the stand, suggesting an interactive and lively atmosphere.",
            &["images/redbull-tetris/1.jpg", "images/redbull-tetris/2.jpg"],
        ),
        loc(
            "HackYeah Blocks",
            r#"This large arena space is set up for an event, featuring a prominent stage with "YEAH HACK" spelled out in large pink and white blocks. The tiered seating around the arena is illuminated with purple and blue lighting, creating a dynamic atmosphere. Overhead, a circular screen displays "HACK YEAH", and professional audio equipment, including large speakers, are visible on and around the stage, indicating a significant production."#,
            &[],
        ),
        loc(
            "Registration Lemur",
            r#"This image features the distinctive purple and white lemur mascot, this time holding a "REGISTRATION" sign. The mascot stands on a bright green floor with a prominent red strip running through it, leading towards a visible entrance area with turnstiles. The background shows a modern indoor space with exposed ceilings and additional signage for "hacknite," hinting at an event or conference setting."#,
            &[],
        ),
    ]
}
