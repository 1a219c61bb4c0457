use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

use super::data::{ItemId, RowList, RowRecord};

/// Errors raised while reading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog {path} lists id {id} more than once")]
    DuplicateId { path: PathBuf, id: ItemId },
}

/// Anything that can supply the initial rows of the list
pub trait ItemSource {
    /// Short human-readable name for logs and the status line
    fn name(&self) -> String;

    /// Load the rows in display order
    fn load(&self) -> Result<RowList, CatalogError>;
}

/// Built-in catalog of ten TV shows
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedCatalog;

impl ItemSource for SeedCatalog {
    fn name(&self) -> String {
        "built-in catalog".to_string()
    }

    fn load(&self) -> Result<RowList, CatalogError> {
        Ok(SEED
            .iter()
            .map(|&(id, image_path, description)| RowRecord::new(id, image_path, description))
            .collect())
    }
}

/// Catalog stored as a JSON array of rows on disk
///
/// ```json
/// [{ "id": 1, "image_path": "/poster.jpg", "description": "..." }]
/// ```
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ItemSource for JsonCatalog {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<RowList, CatalogError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;

        let rows: RowList = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })?;

        // Ids must be unique before the rows ever reach the reconciler
        let mut seen = HashSet::new();
        if let Some(row) = rows.iter().find(|row| !seen.insert(row.id)) {
            return Err(CatalogError::DuplicateId {
                path: self.path.clone(),
                id: row.id,
            });
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "catalog loaded");
        Ok(rows)
    }
}

const SEED: [(ItemId, &str, &str); 10] = [
    (
        1,
        "/d0d0gI46dadUPwF4t5XluXR96eA.jpg",
        "Wanda Maximoff and Vision—two super-powered beings living idealized suburban lives—begin to suspect that everything is not as it seems.",
    ),
    (
        2,
        "/wRbjVBdDo5qHAEOVYoMWpM58FSA.jpg",
        "Set in the present, the series offers a bold, subversive take on Archie, Betty, Veronica and their friends, exploring the surreality of small-town life, the darkness and weirdness bubbling beneath Riverdale’s wholesome facade.",
    ),
    (
        3,
        "/rqeYMLryjcawh2JeRpCVUDXYM5b.jpg",
        "Sheriff's deputy Rick Grimes awakens from a coma to find a post-apocalyptic world dominated by flesh-eating zombies. He sets out to find his family and encounters many other survivors along the way.",
    ),
    (
        4,
        "/kl07N07l4XNjXF48oujzWXs40Dw.jpg",
        "In an inaccessible place between the mountains and isolated from the world, a school is located next to an old monastery. The students are rebellious and problematic young people who live under the strict and severe discipline imposed by the center to reintegrate them into society. The surrounding forest is home to ancient legends, threats that are still valid and that will immerse them in terrifying adventures.",
    ),
    (
        5,
        "/4EYPN5mVIhKLfxGruy7Dy41dTVn.jpg",
        "Bored and unhappy as the Lord of Hell, Lucifer Morningstar abandoned his throne and retired to Los Angeles, where he has teamed up with LAPD detective Chloe Decker to take down criminals. But the longer he's away from the underworld, the greater the threat that the worst of humanity could escape.",
    ),
    (
        6,
        "/6tfT03sGp9k4c0J3dypjrI8TSAI.jpg",
        "A young surgeon with Savant syndrome is recruited into the surgical unit of a prestigious hospital. The question will arise: can a person who doesn't have the ability to relate to people actually save their lives",
    ),
    (
        7,
        "/6SJppowm7cdQgLkvoTlnTUSbjr9.jpg",
        "After years of facing megalomaniacal supervillains, monsters wreaking havoc on Metropolis, and alien invaders intent on wiping out the human race, The Man of Steel aka Clark Kent and Lois Lane come face to face with one of their greatest challenges ever: dealing with all the stress, pressures and complexities that come with being working parents in today's society.",
    ),
    (
        8,
        "/clnyhPqj1SNgpAdeSS6a6fwE6Bo.jpg",
        "Follows the personal and professional lives of a group of doctors at Seattle’s Grey Sloan Memorial Hospital.",
    ),
    (
        9,
        "/qTZIgXrBKURBK1KrsT7fe3qwtl9.jp",
        "In a place where young witches, vampires, and werewolves are nurtured to be their best selves in spite of their worst impulses, Klaus Mikaelson’s daughter, 17-year-old Hope Mikaelson, Alaric Saltzman’s twins, Lizzie and Josie Saltzman, among others, come of age into heroes and villains at The Salvatore School for the Young and Gifted.",
    ),
    (
        10,
        "/lJA2RCMfsWoskqlQhXPSLFQGXEJ.jpg",
        "After a particle accelerator causes a freak storm, CSI Investigator Barry Allen is struck by lightning and falls into a coma. Months later he awakens with the power of super speed, granting him the ability to move through Central City like an unseen guardian angel. Though initially excited by his newfound powers, Barry is shocked to discover he is not the only \"meta-human\" who was created in the wake of the accelerator explosion -- and not everyone is using their new powers for good. Barry partners with S.T.A.R. Labs and dedicates his life to protect the innocent. For now, only a few close friends and associates know that Barry is literally the fastest man alive, but it won't be long before the world learns what Barry Allen has become...The Flash.",
    ),
];
