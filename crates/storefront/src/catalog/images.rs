//! Image filename resolution.
//!
//! The spreadsheets refer to images by short names (`"3.jpg"`); the files on
//! disk keep the names they were exported with. Each catalog has a fixed
//! lookup table from short name to served file.

use super::CatalogKind;

/// Served path used when a store image is not in the table.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

const STORE_IMAGES: &[(&str, &str)] = &[
    ("1.jpg", "46049041_1851408448246881_91340420943970304_n.jpg"),
    ("2.jpg", "46157918_1851408464913546_5479694270384308224_n.jpg"),
    ("3.jpg", "46171502_1851408421580217_798453859348381696_n.jpg"),
    ("4.jpg", "46183924_1851408371580222_3627577524784988160_n.jpg"),
    ("5.jpg", "475777108_8867635843290738_8796161327523431186_n.jpg"),
    ("6.jpg", "475809357_8867635723290750_4545945436560665291_n.jpg"),
    ("7.jpg", "475844922_8867635873290735_5182707465057393519_n.jpg"),
    ("8.jpg", "475880434_8867635459957443_3220833299838462007_n.jpg"),
    ("9.jpg", "492004825_9368956366492014_878423927105912464_n.jpg"),
    ("10.jpg", "492077609_9370656769655307_3718851616967647908_n.jpg"),
    ("11.jpg", "496011660_9517738658280450_6532994532541587677_n.jpg"),
];

const LIMITED_EDITION_IMAGES: &[(&str, &str)] = &[
    ("1.jpg", "516930260_9954350284619283_2642336253183266056_n.jpg"),
    ("2.jpg", "518352313_10046510578736586_7739042478145945783_n.jpg"),
    ("3.jpg", "518811770_10038702709517373_2363748120092957531_n.jpg"),
    ("4.jpg", "518284550_9985441824843462_4345875780933125577_n.jpg"),
    ("5.jpg", "519421729_10061326177255026_8645730988978430344_n.jpg"),
    ("6.jpg", "522127626_10068779516509692_8638792474902019974_n.jpg"),
];

/// What to do with a filename that is not in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingImage {
    /// Serve this path instead.
    Placeholder(&'static str),
    /// Serve `{base}/{filename}` as given.
    PassThrough,
}

/// Resolves spreadsheet image names to served paths for one catalog.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_path: &'static str,
    table: &'static [(&'static str, &'static str)],
    missing: MissingImage,
}

impl ImageResolver {
    #[must_use]
    pub const fn for_kind(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Store => Self {
                base_path: "/images/products",
                table: STORE_IMAGES,
                missing: MissingImage::Placeholder(PLACEHOLDER_IMAGE),
            },
            CatalogKind::LimitedEdition => Self {
                base_path: "/images/limited-edition",
                table: LIMITED_EDITION_IMAGES,
                missing: MissingImage::PassThrough,
            },
        }
    }

    /// Served path for a filename.
    ///
    /// Anything containing `/` is taken to be a path already and returned
    /// unchanged.
    #[must_use]
    pub fn resolve(&self, filename: &str) -> String {
        let filename = filename.trim();
        if filename.contains('/') {
            return filename.to_string();
        }

        let mapped = self
            .table
            .iter()
            .find(|(short, _)| *short == filename)
            .map(|(_, actual)| *actual);

        match (mapped, &self.missing) {
            (Some(actual), _) => format!("{}/{actual}", self.base_path),
            (None, MissingImage::Placeholder(path)) => (*path).to_string(),
            (None, MissingImage::PassThrough) => format!("{}/{filename}", self.base_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_table_hit() {
        let resolver = ImageResolver::for_kind(CatalogKind::Store);
        assert_eq!(
            resolver.resolve("3.jpg"),
            "/images/products/46171502_1851408421580217_798453859348381696_n.jpg"
        );
    }

    #[test]
    fn test_store_miss_uses_placeholder() {
        let resolver = ImageResolver::for_kind(CatalogKind::Store);
        assert_eq!(resolver.resolve("12.jpg"), PLACEHOLDER_IMAGE);
        assert_eq!(resolver.resolve(""), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_limited_edition_miss_passes_through() {
        let resolver = ImageResolver::for_kind(CatalogKind::LimitedEdition);
        assert_eq!(
            resolver.resolve("le-007.jpg"),
            "/images/limited-edition/le-007.jpg"
        );
        assert_eq!(
            resolver.resolve("2.jpg"),
            "/images/limited-edition/518352313_10046510578736586_7739042478145945783_n.jpg"
        );
    }

    #[test]
    fn test_paths_pass_through() {
        for kind in [CatalogKind::Store, CatalogKind::LimitedEdition] {
            let resolver = ImageResolver::for_kind(kind);
            assert_eq!(resolver.resolve("/images/custom/a.jpg"), "/images/custom/a.jpg");
        }
    }
}
