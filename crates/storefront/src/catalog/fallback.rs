//! Static product data used when the live sheet is unavailable.
//!
//! The built-in lists mirror what the site showed before the sheets existed.
//! A deployment can point a catalog at a JSON file instead (an array of
//! products, e.g. produced by `prints-cli catalog fallback store`).

use std::path::PathBuf;

use wildlife_prints_core::{Price, Product};

use super::images::ImageResolver;
use super::{CatalogError, CatalogKind};

/// Where a catalog's fallback data comes from.
#[derive(Debug, Clone)]
pub enum FallbackStore {
    /// Compiled-in data for the catalog kind.
    Builtin(CatalogKind),
    /// JSON array of products on disk, read at load time.
    File(PathBuf),
}

impl FallbackStore {
    /// Load the fallback products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::FallbackUnavailable`] if a file-backed store
    /// cannot be read or does not contain a product array.
    pub async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Builtin(kind) => Ok(builtin(*kind)),
            Self::File(path) => {
                let text = tokio::fs::read_to_string(path).await.map_err(|e| {
                    CatalogError::FallbackUnavailable(format!("{}: {e}", path.display()))
                })?;
                serde_json::from_str(&text).map_err(|e| {
                    CatalogError::FallbackUnavailable(format!("{}: {e}", path.display()))
                })
            }
        }
    }
}

/// Compiled-in fallback products for a catalog.
#[must_use]
pub fn builtin(kind: CatalogKind) -> Vec<Product> {
    match kind {
        CatalogKind::Store => store_prints(),
        CatalogKind::LimitedEdition => limited_edition_prints(),
    }
}

struct StorePrint {
    id: &'static str,
    name: &'static str,
    price: u32,
    description: &'static str,
    full_description: &'static str,
    gallery: [&'static str; 3],
}

const STORE_PRINTS: &[StorePrint] = &[
    StorePrint {
        id: "1",
        name: "Sunset Serenity Print",
        price: 280,
        description: "Beautiful sunset landscape with silhouetted grass in warm tones.",
        full_description: "A breathtaking sunset scene capturing the serene beauty of nature. The warm pink and orange hues create a peaceful atmosphere, with delicate grass silhouettes dancing in the foreground. This print brings tranquility and natural beauty to any space.",
        gallery: ["2.jpg", "2.jpg", "2.jpg"],
    },
    StorePrint {
        id: "2",
        name: "Golden Hour Wildlife",
        price: 350,
        description: "Majestic deer silhouettes against a dramatic golden sunset.",
        full_description: "A stunning wildlife photograph featuring deer silhouettes against a magnificent golden sunset. The dramatic lighting and composition create a powerful image that celebrates the beauty of wildlife in their natural habitat.",
        gallery: ["2.jpg", "3.jpg", "4.jpg"],
    },
    StorePrint {
        id: "3",
        name: "Bengal Tiger Portrait",
        price: 420,
        description: "Powerful portrait of a Bengal Tiger in its natural habitat.",
        full_description: "An intense and powerful portrait of a Bengal Tiger, capturing the raw beauty and strength of one of nature's most magnificent predators. This image showcases the tiger's piercing gaze and distinctive markings in incredible detail.",
        gallery: ["3.jpg", "4.jpg", "5.jpg"],
    },
    StorePrint {
        id: "4",
        name: "Humpback Whale Breach",
        price: 380,
        description: "Spectacular moment of a humpback whale breaching the surface.",
        full_description: "A breathtaking capture of a humpback whale breaching the ocean surface, demonstrating the incredible power and grace of these marine giants. This photograph was taken during a memorable encounter in pristine Antarctic waters.",
        gallery: ["4.jpg", "5.jpg", "6.jpg"],
    },
    StorePrint {
        id: "5",
        name: "Mountain Gorilla Family",
        price: 450,
        description: "Intimate family portrait of mountain gorillas in Rwanda.",
        full_description: "An intimate family portrait of mountain gorillas in their natural habitat in the Virunga Mountains of Rwanda. This photograph captures the gentle nature and complex social bonds of these endangered primates.",
        gallery: ["5.jpg", "6.jpg", "7.jpg"],
    },
    StorePrint {
        id: "6",
        name: "Leopard Close-Up",
        price: 390,
        description: "Stunning close-up portrait of a leopard showing intricate details.",
        full_description: "An extraordinary close-up portrait of a leopard, showcasing the incredible detail of their spotted coat and intense gaze. This image captures the wild beauty and mysterious nature of one of Africa's most elusive big cats.",
        gallery: ["6.jpg", "7.jpg", "8.jpg"],
    },
    StorePrint {
        id: "7",
        name: "Forest Antelope",
        price: 320,
        description: "Graceful antelope in natural forest environment.",
        full_description: "A beautiful capture of an antelope in its natural forest habitat. The image showcases the grace and elegance of these magnificent creatures, highlighting their natural beauty and the serene environment they call home.",
        gallery: ["7.jpg", "8.jpg", "9.jpg"],
    },
    StorePrint {
        id: "8",
        name: "Wildlife Conservation",
        price: 300,
        description: "Powerful wildlife conservation message with stunning imagery.",
        full_description: "A powerful image that combines stunning wildlife photography with an important conservation message. This piece serves as both beautiful art and a reminder of our responsibility to protect these magnificent creatures.",
        gallery: ["8.jpg", "9.jpg", "10.jpg"],
    },
    StorePrint {
        id: "9",
        name: "African Safari Scene",
        price: 360,
        description: "Classic African safari landscape with wildlife.",
        full_description: "A classic African safari scene capturing the essence of the wild. This image transports viewers to the heart of Africa, showcasing the natural beauty and wildlife that make this continent so special.",
        gallery: ["9.jpg", "10.jpg", "11.jpg"],
    },
    StorePrint {
        id: "10",
        name: "Wilderness Portrait",
        price: 340,
        description: "Intimate wildlife portrait in natural wilderness setting.",
        full_description: "An intimate wildlife portrait taken in a pristine wilderness setting. This image captures the essence of wild animals in their natural habitat, showcasing their beauty and the importance of wildlife conservation.",
        gallery: ["10.jpg", "11.jpg", "1.jpg"],
    },
    StorePrint {
        id: "11",
        name: "Nature's Majesty",
        price: 400,
        description: "Majestic wildlife photograph celebrating nature's beauty.",
        full_description: "A majestic wildlife photograph that celebrates the incredible beauty and diversity of nature. This image represents the culmination of patience, skill, and respect for wildlife, resulting in a truly spectacular capture.",
        gallery: ["11.jpg", "1.jpg", "2.jpg"],
    },
];

struct EditionPrint {
    id: &'static str,
    title: &'static str,
    price: u32,
    description: &'static str,
    category: &'static str,
    size: &'static str,
    image: &'static str,
}

const EDITION_PRINTS: &[EditionPrint] = &[
    EditionPrint {
        id: "le-001",
        title: "Black Deer",
        price: 450,
        description: "Limited edition black deer print",
        category: "Wildlife",
        size: "A3",
        image: "1.jpg",
    },
    EditionPrint {
        id: "le-002",
        title: "Tiger Portrait",
        price: 520,
        description: "Majestic tiger limited edition print",
        category: "Wildlife",
        size: "A2",
        image: "2.jpg",
    },
    EditionPrint {
        id: "le-003",
        title: "Bull Power",
        price: 380,
        description: "Powerful bull artwork",
        category: "Animals",
        size: "A3",
        image: "3.jpg",
    },
    EditionPrint {
        id: "le-004",
        title: "Wildlife Scene",
        price: 420,
        description: "Beautiful wildlife photography",
        category: "Wildlife",
        size: "A3",
        image: "4.jpg",
    },
    EditionPrint {
        id: "le-005",
        title: "Nature Study",
        price: 350,
        description: "Stunning nature composition",
        category: "Wildlife",
        size: "A4",
        image: "5.jpg",
    },
    EditionPrint {
        id: "le-006",
        title: "Animal Portrait",
        price: 480,
        description: "Professional animal photography",
        category: "Animals",
        size: "A2",
        image: "6.jpg",
    },
];

fn store_prints() -> Vec<Product> {
    let images = ImageResolver::for_kind(CatalogKind::Store);
    STORE_PRINTS
        .iter()
        .map(|print| {
            let mut product = Product::new(
                print.id,
                print.name,
                Price::whole(print.price),
                images.resolve(&format!("{}.jpg", print.id)),
            );
            product.description = print.description.to_string();
            product.full_description = Some(print.full_description.to_string());
            product.gallery = print.gallery.iter().map(|name| images.resolve(name)).collect();
            product
        })
        .collect()
}

fn limited_edition_prints() -> Vec<Product> {
    let images = ImageResolver::for_kind(CatalogKind::LimitedEdition);
    EDITION_PRINTS
        .iter()
        .map(|print| {
            let mut product = Product::new(
                print.id,
                print.title,
                Price::whole(print.price),
                images.resolve(print.image),
            );
            product.description = print.description.to_string();
            product.category = Some(print.category.to_string());
            product.size = Some(print.size.to_string());
            product
        })
        .collect()
}
