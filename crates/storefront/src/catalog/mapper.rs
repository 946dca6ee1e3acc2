//! Conversion of parsed sheet rows into product records.

use std::collections::HashSet;

use wildlife_prints_core::{Product, ProductId};

use super::CatalogKind;
use super::csv::{Column, FieldIssue, ParsedSheet, SheetRow, parse_price};
use super::images::ImageResolver;

/// Products mapped from one sheet, plus every data-quality issue found.
#[derive(Debug, Clone, Default)]
pub struct MappedCatalog {
    pub products: Vec<Product>,
    pub issues: Vec<FieldIssue>,
}

/// Maps rows of one catalog's sheet to [`Product`]s.
#[derive(Debug, Clone)]
pub struct RecordMapper {
    kind: CatalogKind,
    images: ImageResolver,
}

impl RecordMapper {
    #[must_use]
    pub const fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            images: ImageResolver::for_kind(kind),
        }
    }

    #[must_use]
    pub const fn images(&self) -> &ImageResolver {
        &self.images
    }

    /// Map every row, keeping the first occurrence of each id.
    #[must_use]
    pub fn map_rows(&self, sheet: &ParsedSheet) -> MappedCatalog {
        let mut seen = HashSet::new();
        let mut mapped = MappedCatalog::default();

        for row in &sheet.rows {
            let Some(id) = row.value(&Column::Id) else {
                mapped.issues.push(FieldIssue::new(
                    row.line,
                    &Column::Id,
                    "",
                    "missing id, row skipped",
                ));
                continue;
            };
            if !seen.insert(id.to_string()) {
                mapped.issues.push(FieldIssue::new(
                    row.line,
                    &Column::Id,
                    id,
                    "duplicate id, row skipped",
                ));
                continue;
            }

            let (product, issue) = self.map_row(id, row);
            mapped.issues.extend(issue);
            mapped.products.push(product);
        }

        mapped
    }

    fn map_row(&self, id: &str, row: &SheetRow) -> (Product, Option<FieldIssue>) {
        let (price, issue) = parse_price(row.get(&Column::Price).unwrap_or_default(), row.line);

        let image_name = row
            .value(&Column::Image)
            .map_or_else(|| format!("{id}.jpg"), str::to_string);
        let image = self.images.resolve(&image_name);

        let description = row.get(&Column::Description).unwrap_or_default().to_string();
        let full_description = match self.kind {
            CatalogKind::Store => Some(
                row.value(&Column::FullDescription)
                    .unwrap_or(description.as_str())
                    .to_string(),
            ),
            CatalogKind::LimitedEdition => {
                row.value(&Column::FullDescription).map(str::to_string)
            }
        };

        let gallery = row.value(&Column::Gallery).map_or_else(
            || self.default_gallery(id, &image),
            |names| {
                names
                    .split(['|', ';'])
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(|name| self.images.resolve(name))
                    .collect()
            },
        );

        let product = Product {
            id: ProductId::new(id),
            name: row.get(&Column::Title).unwrap_or_default().to_string(),
            price,
            description,
            full_description,
            category: row.value(&Column::Category).map(str::to_string),
            size: row.value(&Column::Size).map(str::to_string),
            image,
            gallery,
            attributes: row
                .extras()
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect(),
        };
        (product, issue)
    }

    /// Gallery used when the sheet has no `gallery` cell.
    fn default_gallery(&self, id: &str, primary: &str) -> Vec<String> {
        match self.kind {
            CatalogKind::Store => legacy_store_gallery(id).map_or_else(
                || vec![primary.to_string()],
                |names| names.iter().map(|name| self.images.resolve(name)).collect(),
            ),
            CatalogKind::LimitedEdition => Vec::new(),
        }
    }
}

/// Per-id gallery used by the store before sheets carried a gallery column.
///
/// Must stay in sync with the images on disk.
const fn legacy_store_gallery(id: &str) -> Option<[&'static str; 3]> {
    match id.as_bytes() {
        b"1" | b"2" | b"3" | b"4" => Some(["2.jpg", "3.jpg", "4.jpg"]),
        b"5" => Some(["5.jpg", "6.jpg", "7.jpg"]),
        b"6" => Some(["6.jpg", "7.jpg", "8.jpg"]),
        b"7" => Some(["7.jpg", "8.jpg", "9.jpg"]),
        b"8" => Some(["8.jpg", "9.jpg", "10.jpg"]),
        b"9" => Some(["9.jpg", "10.jpg", "11.jpg"]),
        b"10" => Some(["10.jpg", "11.jpg", "1.jpg"]),
        b"11" => Some(["11.jpg", "1.jpg", "2.jpg"]),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use wildlife_prints_core::Price;

    use super::*;
    use crate::catalog::csv::parse_sheet;
    use crate::catalog::images::PLACEHOLDER_IMAGE;

    fn map(kind: CatalogKind, text: &str) -> MappedCatalog {
        RecordMapper::new(kind).map_rows(&parse_sheet(text).unwrap())
    }

    #[test]
    fn test_store_row_maps_fields() {
        let mapped = map(
            CatalogKind::Store,
            "id,title,price,description,category,frame\n\
             3,Bengal Tiger Portrait,420,Powerful portrait,Big Cats,Oak\n",
        );
        let product = &mapped.products[0];
        assert_eq!(product.id.as_str(), "3");
        assert_eq!(product.name, "Bengal Tiger Portrait");
        assert_eq!(product.price, Price::whole(420));
        assert_eq!(product.full_description.as_deref(), Some("Powerful portrait"));
        assert_eq!(product.category.as_deref(), Some("Big Cats"));
        assert!(product.image.ends_with("46171502_1851408421580217_798453859348381696_n.jpg"));
        assert_eq!(product.attributes.get("frame").map(String::as_str), Some("Oak"));
        assert!(mapped.issues.is_empty());
    }

    #[test]
    fn test_non_numeric_price_is_zero_with_issue() {
        let mapped = map(CatalogKind::Store, "id,title,price\n1,Sunset,TBD\n");
        assert_eq!(mapped.products[0].price, Price::zero());
        assert_eq!(mapped.issues.len(), 1);
        assert_eq!(mapped.issues[0].column, "price");
    }

    #[test]
    fn test_unknown_image_uses_placeholder() {
        let mapped = map(
            CatalogKind::Store,
            "id,title,price,image\n20,New Print,300,missing.jpg\n",
        );
        assert_eq!(mapped.products[0].image, PLACEHOLDER_IMAGE);
        assert_eq!(mapped.products[0].gallery, [PLACEHOLDER_IMAGE]);
    }

    #[test]
    fn test_legacy_gallery_table() {
        let resolver = ImageResolver::for_kind(CatalogKind::Store);
        let mapped = map(
            CatalogKind::Store,
            "id,title,price\n1,A,1\n5,B,1\n10,C,1\n11,D,1\n",
        );
        let galleries: Vec<&Vec<String>> = mapped.products.iter().map(|p| &p.gallery).collect();
        let expect = |names: [&str; 3]| names.map(|n| resolver.resolve(n)).to_vec();
        assert_eq!(*galleries[0], expect(["2.jpg", "3.jpg", "4.jpg"]));
        assert_eq!(*galleries[1], expect(["5.jpg", "6.jpg", "7.jpg"]));
        assert_eq!(*galleries[2], expect(["10.jpg", "11.jpg", "1.jpg"]));
        assert_eq!(*galleries[3], expect(["11.jpg", "1.jpg", "2.jpg"]));
    }

    #[test]
    fn test_gallery_column_overrides_table() {
        let mapped = map(
            CatalogKind::Store,
            "id,title,price,gallery\n1,A,1,\"7.jpg|/images/extra/x.jpg; 8.jpg\"\n",
        );
        let resolver = ImageResolver::for_kind(CatalogKind::Store);
        assert_eq!(
            mapped.products[0].gallery,
            [
                resolver.resolve("7.jpg"),
                "/images/extra/x.jpg".to_string(),
                resolver.resolve("8.jpg"),
            ]
        );
    }

    #[test]
    fn test_limited_edition_defaults() {
        let mapped = map(
            CatalogKind::LimitedEdition,
            "id,title,price,description,category,size\n\
             le-007,Snow Leopard,600,Rare,Big Cats,A2\n",
        );
        let product = &mapped.products[0];
        assert_eq!(product.image, "/images/limited-edition/le-007.jpg");
        assert_eq!(product.size.as_deref(), Some("A2"));
        assert!(product.full_description.is_none());
        assert!(product.gallery.is_empty());
    }

    #[test]
    fn test_missing_and_duplicate_ids_are_skipped() {
        let mapped = map(
            CatalogKind::Store,
            "id,title,price\n,Nameless,10\n2,First,350\n2,Second,999\n",
        );
        assert_eq!(mapped.products.len(), 1);
        assert_eq!(mapped.products[0].name, "First");
        assert_eq!(mapped.issues.len(), 2);
        assert_eq!(mapped.issues[0].line, 2);
        assert_eq!(mapped.issues[1].line, 4);
    }
}
