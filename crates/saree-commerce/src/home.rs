//! Homepage content: hero slides, category tiles, testimonials, newsletter.

use crate::delay::{Latency, Timer};
use crate::nav::category_href;
use crate::validation::is_plausible_email;
use serde::Serialize;

/// Hero carousel auto-advance interval.
pub const HERO_INTERVAL_MS: u64 = 5000;

/// Testimonial carousel auto-advance interval.
pub const TESTIMONIAL_INTERVAL_MS: u64 = 6000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub cta_text: &'static str,
    pub cta_link: String,
    pub offer: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTile {
    pub name: &'static str,
    pub description: &'static str,
    pub link: String,
    pub product_count: &'static str,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub name: &'static str,
    pub location: &'static str,
    pub rating: u8,
    pub review: &'static str,
    pub purchase_type: &'static str,
    pub verified: bool,
}

pub fn hero_slides() -> Vec<HeroSlide> {
    vec![
        HeroSlide {
            title: "Exquisite Bridal Collection",
            subtitle: "Discover timeless elegance for your special day",
            description: "Handcrafted sarees with intricate embroidery and premium fabrics",
            cta_text: "Shop Bridal Sarees",
            cta_link: category_href("bridal"),
            offer: "Up to 30% Off",
        },
        HeroSlide {
            title: "Festival Special Collection",
            subtitle: "Celebrate traditions with vibrant colors",
            description: "Premium silk sarees perfect for festivals and celebrations",
            cta_text: "Explore Festival Wear",
            cta_link: category_href("festival"),
            offer: "Free Shipping",
        },
        HeroSlide {
            title: "Contemporary Elegance",
            subtitle: "Modern designs with traditional charm",
            description: "Designer sarees for the contemporary Indian woman",
            cta_text: "Shop Designer Collection",
            cta_link: category_href("designer"),
            offer: "New Arrivals",
        },
    ]
}

pub fn category_tiles() -> Vec<CategoryTile> {
    [
        ("Silk Sarees", "Premium silk collection", "silk", "150+ Designs", true),
        ("Cotton Sarees", "Comfortable daily wear", "cotton", "200+ Designs", false),
        ("Designer Sarees", "Contemporary elegance", "designer", "80+ Designs", true),
        ("Bridal Collection", "Wedding special sarees", "bridal", "120+ Designs", true),
        ("Georgette Sarees", "Flowing and graceful", "georgette", "90+ Designs", false),
        ("Chiffon Sarees", "Light and elegant", "chiffon", "70+ Designs", false),
    ]
    .into_iter()
    .map(|(name, description, slug, product_count, featured)| CategoryTile {
        name,
        description,
        link: category_href(slug),
        product_count,
        featured,
    })
    .collect()
}

pub fn testimonials() -> Vec<Testimonial> {
    let t = |name, location, review, purchase_type| Testimonial {
        name,
        location,
        rating: 5,
        review,
        purchase_type,
        verified: true,
    };
    vec![
        t(
            "Priya Sharma",
            "Mumbai, Maharashtra",
            "R.G Kasat has been my go-to destination for sarees for over 10 years. The quality is exceptional, and their collection never fails to impress.",
            "Bridal Collection",
        ),
        t(
            "Meera Patel",
            "Ahmedabad, Gujarat",
            "The customer service is outstanding! The staff helped me choose the perfect saree for my sister's engagement ceremony.",
            "Designer Sarees",
        ),
        t(
            "Anjali Reddy",
            "Hyderabad, Telangana",
            "Their collection of silk sarees is unmatched. The attention to detail and the traditional craftsmanship is evident in every piece.",
            "Silk Sarees",
        ),
        t(
            "Kavitha Nair",
            "Kochi, Kerala",
            "The saree I ordered looked exactly like the picture, and the delivery was prompt. The packaging was also very elegant.",
            "Online Purchase",
        ),
        t(
            "Sunita Gupta",
            "Delhi, NCR",
            "Three generations of our family have been loyal customers of R.G Kasat. The trust and quality they maintain is remarkable.",
            "Family Collection",
        ),
    ]
}

/// Index into a wrapping carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn previous(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// Jump to a slide. Out-of-range indexes are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }
}

/// Validate and "submit" a newsletter signup.
///
/// Returns the message to show under the input on failure.
pub async fn subscribe_newsletter(
    email: &str,
    timer: &dyn Timer,
    latency: &Latency,
) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err("Please enter your email address");
    }
    if !is_plausible_email(email) {
        return Err("Please enter a valid email address");
    }
    timer.sleep(Latency::duration(latency.newsletter)).await;
    tracing::info!("newsletter subscription accepted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::NoDelay;

    #[test]
    fn test_category_links() {
        let tiles = category_tiles();
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0].link, "/product-catalog?category=silk");
    }

    #[test]
    fn test_carousel_wraps() {
        let mut carousel = Carousel::new(hero_slides().len());
        assert_eq!(carousel.previous(), 2);
        assert_eq!(carousel.next(), 0);
        carousel.go_to(7);
        assert_eq!(carousel.index(), 0);

        let mut empty = Carousel::new(0);
        assert_eq!(empty.next(), 0);
    }

    #[tokio::test]
    async fn test_newsletter_validation() {
        let latency = Latency::instant();
        assert_eq!(
            subscribe_newsletter("", &NoDelay, &latency).await,
            Err("Please enter your email address")
        );
        assert_eq!(
            subscribe_newsletter("priya@mail", &NoDelay, &latency).await,
            Err("Please enter a valid email address")
        );
        assert!(subscribe_newsletter("priya@mail.com", &NoDelay, &latency).await.is_ok());
        assert_eq!(testimonials().len(), 5);
    }
}
