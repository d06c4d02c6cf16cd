//! The built-in catalog.

use crate::catalog::{Product, ProductDetail, ProductImage, Review, SizeOption};
use crate::ids::ProductId;
use crate::money::Money;

pub(crate) const IMG_BANARASI: &str =
    "https://images.unsplash.com/photo-1610030469983-98e550d6193c?w=600&h=800&fit=crop";
pub(crate) const IMG_DRAPE: &str =
    "https://images.unsplash.com/photo-1583391733956-6c78276477e2?w=600&h=800&fit=crop";
pub(crate) const IMG_DESIGNER: &str =
    "https://images.unsplash.com/photo-1594736797933-d0401ba2fe65?w=600&h=800&fit=crop";

/// Per-order cap on the detail page.
const DETAIL_MAX_QUANTITY: u32 = 5;

struct Seed {
    id: u32,
    name: &'static str,
    category: &'static str,
    price: i64,
    original_price: i64,
    image: &'static str,
    in_stock: bool,
    is_new: bool,
    rating: f32,
    review_count: u32,
    features: [&'static str; 3],
    description: &'static str,
    fabric: &'static str,
    colors: &'static [&'static str],
    occasions: &'static [&'static str],
    stock_count: u32,
}

const SEEDS: [Seed; 8] = [
    Seed {
        id: 1,
        name: "Elegant Banarasi Silk Saree with Golden Border",
        category: "banarasi",
        price: 15999,
        original_price: 19999,
        image: IMG_BANARASI,
        in_stock: true,
        is_new: true,
        rating: 4.8,
        review_count: 156,
        features: ["Pure Silk", "Handwoven", "Traditional Design"],
        description: "Exquisite Banarasi silk saree featuring intricate golden zari work and traditional motifs.",
        fabric: "pure-silk",
        colors: &["red", "gold"],
        occasions: &["wedding", "traditional"],
        stock_count: 3,
    },
    Seed {
        id: 2,
        name: "Traditional Kanjivaram Silk Saree",
        category: "kanjivaram",
        price: 12499,
        original_price: 16999,
        image: IMG_DRAPE,
        in_stock: true,
        is_new: false,
        rating: 4.7,
        review_count: 89,
        features: ["Pure Silk", "Temple Border", "Rich Colors"],
        description: "Authentic Kanjivaram saree with temple border and rich color combinations.",
        fabric: "pure-silk",
        colors: &["purple", "gold"],
        occasions: &["wedding", "festival"],
        stock_count: 12,
    },
    Seed {
        id: 3,
        name: "Designer Georgette Saree with Embroidery",
        category: "designer",
        price: 8999,
        original_price: 12999,
        image: IMG_DESIGNER,
        in_stock: true,
        is_new: true,
        rating: 4.6,
        review_count: 234,
        features: ["Georgette Fabric", "Embroidered", "Party Wear"],
        description: "Contemporary designer saree perfect for parties and special occasions.",
        fabric: "georgette",
        colors: &["pink"],
        occasions: &["party"],
        stock_count: 8,
    },
    Seed {
        id: 4,
        name: "Cotton Handloom Saree with Block Print",
        category: "cotton",
        price: 3499,
        original_price: 4999,
        image: IMG_BANARASI,
        in_stock: true,
        is_new: false,
        rating: 4.5,
        review_count: 167,
        features: ["Pure Cotton", "Block Print", "Eco-Friendly"],
        description: "Comfortable cotton saree with traditional block print designs.",
        fabric: "handloom",
        colors: &["blue", "white"],
        occasions: &["casual", "office"],
        stock_count: 20,
    },
    Seed {
        id: 5,
        name: "Chiffon Saree with Sequin Work",
        category: "chiffon",
        price: 6999,
        original_price: 9999,
        image: IMG_DRAPE,
        in_stock: false,
        is_new: false,
        rating: 4.4,
        review_count: 98,
        features: ["Chiffon Fabric", "Sequin Work", "Lightweight"],
        description: "Elegant chiffon saree with beautiful sequin embellishments.",
        fabric: "chiffon",
        colors: &["black"],
        occasions: &["party"],
        stock_count: 0,
    },
    Seed {
        id: 6,
        name: "Art Silk Saree with Digital Print",
        category: "silk",
        price: 4999,
        original_price: 7999,
        image: IMG_DESIGNER,
        in_stock: true,
        is_new: true,
        rating: 4.3,
        review_count: 145,
        features: ["Art Silk", "Digital Print", "Modern Design"],
        description: "Modern art silk saree with vibrant digital print patterns.",
        fabric: "art-silk",
        colors: &["orange", "yellow"],
        occasions: &["casual", "festival"],
        stock_count: 15,
    },
    Seed {
        id: 7,
        name: "Handwoven Cotton Silk Saree",
        category: "cotton",
        price: 7499,
        original_price: 10999,
        image: IMG_BANARASI,
        in_stock: true,
        is_new: false,
        rating: 4.7,
        review_count: 123,
        features: ["Cotton Silk", "Handwoven", "Natural Dyes"],
        description: "Handwoven cotton silk saree with natural dye colors.",
        fabric: "cotton-silk",
        colors: &["green"],
        occasions: &["office", "traditional"],
        stock_count: 6,
    },
    Seed {
        id: 8,
        name: "Georgette Saree with Floral Embroidery",
        category: "georgette",
        price: 9999,
        original_price: 13999,
        image: IMG_DRAPE,
        in_stock: true,
        is_new: true,
        rating: 4.6,
        review_count: 178,
        features: ["Georgette", "Floral Embroidery", "Elegant"],
        description: "Beautiful georgette saree with intricate floral embroidery work.",
        fabric: "georgette",
        colors: &["pink", "white"],
        occasions: &["festival", "party"],
        stock_count: 9,
    },
];

impl Seed {
    fn to_product(&self) -> Product {
        Product {
            id: self.id.into(),
            name: self.name.to_string(),
            category: self.category.to_string(),
            price: Money::new(self.price),
            original_price: Money::new(self.original_price),
            image: self.image.to_string(),
            in_stock: self.in_stock,
            is_new: self.is_new,
            rating: self.rating,
            review_count: self.review_count,
            features: self.features.iter().map(|s| s.to_string()).collect(),
            description: self.description.to_string(),
            fabric: self.fabric.to_string(),
            colors: self.colors.iter().map(|s| s.to_string()).collect(),
            occasions: self.occasions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Every product, in catalog (relevance) order.
pub fn products() -> Vec<Product> {
    SEEDS.iter().map(Seed::to_product).collect()
}

/// Look up a single product.
pub fn find_product(id: &ProductId) -> Option<Product> {
    SEEDS
        .iter()
        .find(|s| s.id.to_string() == id.as_str())
        .map(Seed::to_product)
}

/// Full detail page record for a product.
pub fn product_detail(id: &ProductId) -> Option<ProductDetail> {
    let seed = SEEDS.iter().find(|s| s.id.to_string() == id.as_str())?;
    let product = seed.to_product();

    let images = vec![
        image(seed.image, &["Front View", "Full Length"]),
        image(IMG_DRAPE, &["Detail View", "Border Detail"]),
        image(IMG_DESIGNER, &["Pallu Design", "Fabric Texture"]),
    ];

    let specifications = vec![
        (
            "Fabric".to_string(),
            product.features.first().cloned().unwrap_or_default(),
        ),
        ("Length".to_string(), "5.5 meters".to_string()),
        ("Blouse Piece".to_string(), "0.8 meters".to_string()),
        ("Color".to_string(), title_case(&product.colors.join(" with "))),
        ("Wash Care".to_string(), "Dry Clean Only".to_string()),
        ("Origin".to_string(), "India".to_string()),
    ];

    let (cultural_significance, reviews) = if seed.category == "banarasi" {
        (Some(BANARASI_HERITAGE.to_string()), banarasi_reviews())
    } else {
        (None, Vec::new())
    };

    Some(ProductDetail {
        brand: "Heritage Weaves".to_string(),
        images,
        sizes: vec![
            size("free", "Free Size", true),
            size("petite", "Petite", true),
            size("plus", "Plus Size", false),
        ],
        stock_count: seed.stock_count,
        max_quantity: DETAIL_MAX_QUANTITY,
        cultural_significance,
        occasions: product.occasions.iter().map(|o| title_case(o)).collect(),
        specifications,
        care_instructions: CARE_INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
        reviews,
        product,
    })
}

/// Up to `limit` other products, same category first.
pub fn related_products(id: &ProductId, limit: usize) -> Vec<Product> {
    let all = products();
    let Some(current) = all.iter().find(|p| &p.id == id) else {
        return Vec::new();
    };
    let category = current.category.clone();

    let (mut same, other): (Vec<Product>, Vec<Product>) = all
        .into_iter()
        .filter(|p| &p.id != id)
        .partition(|p| p.category == category);
    same.extend(other);
    same.truncate(limit);
    same
}

fn image(url: &str, tags: &[&str]) -> ProductImage {
    ProductImage {
        url: url.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn size(value: &str, label: &str, available: bool) -> SizeOption {
    SizeOption {
        value: value.to_string(),
        label: label.to_string(),
        available,
    }
}

fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const BANARASI_HERITAGE: &str = "Banarasi sarees have been a symbol of Indian heritage for over 400 years. \
Originally created for the Mughal nobility, these sarees represent the fusion of Indian and Persian \
artistic traditions.";

const CARE_INSTRUCTIONS: [&str; 5] = [
    "Dry clean only to preserve the silk and zari work",
    "Store in a cool, dry place away from direct sunlight",
    "Wrap in muslin cloth or cotton fabric for storage",
    "Avoid contact with perfumes and deodorants",
    "Iron on low heat with a cloth barrier",
];

fn banarasi_reviews() -> Vec<Review> {
    let review = |user: &str, rating: u8, date: &str, comment: &str, helpful: u32| Review {
        user_name: user.to_string(),
        rating,
        date: date.to_string(),
        verified: true,
        comment: comment.to_string(),
        helpful,
    };
    vec![
        review(
            "Priya Sharma",
            5,
            "2 weeks ago",
            "Absolutely stunning saree! The quality is exceptional and the zari work is beautiful.",
            12,
        ),
        review(
            "Meera Patel",
            4,
            "1 month ago",
            "Beautiful saree with rich colors. The blouse piece could be a bit longer.",
            8,
        ),
        review(
            "Anjali Reddy",
            5,
            "2 months ago",
            "My third purchase from Heritage Weaves and they never disappoint.",
            15,
        ),
        review(
            "Kavitha Nair",
            4,
            "3 months ago",
            "Good quality saree. The zari work is intricate and the color is vibrant.",
            6,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eight_products() {
        let all = products();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0].id, ProductId::new("1"));
        assert_eq!(all.iter().filter(|p| !p.in_stock).count(), 1);
    }

    #[test]
    fn test_find_unknown_product() {
        assert!(find_product(&ProductId::new("99")).is_none());
        assert!(product_detail(&ProductId::new("abc")).is_none());
    }

    #[test]
    fn test_related_excludes_current_and_prefers_category() {
        let related = related_products(&ProductId::new("4"), 4);
        assert_eq!(related.len(), 4);
        assert!(related.iter().all(|p| p.id != ProductId::new("4")));
        // product 7 shares the cotton category
        assert_eq!(related[0].id, ProductId::new("7"));
    }

    #[test]
    fn test_detail_reviews() {
        let detail = product_detail(&ProductId::new("1")).unwrap();
        assert_eq!(detail.reviews.len(), 4);
        assert!((detail.average_rating() - 4.5).abs() < 0.01);
        assert_eq!(detail.occasions, vec!["Wedding", "Traditional"]);
    }

    #[test]
    fn test_detail_fabric_spec_from_first_feature() {
        for product in products() {
            let detail = product_detail(&product.id).unwrap();
            let (label, value) = &detail.specifications[0];
            assert_eq!(label, "Fabric");
            assert_eq!(Some(value), product.features.first());
        }
    }
}
