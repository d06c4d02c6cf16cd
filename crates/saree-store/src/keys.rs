//! Well-known store keys shared by the storefront and the CLI.

/// Total quantity across cart items, as a decimal string.
pub const CART_COUNT: &str = "cartCount";

/// JSON array of cart items.
pub const CART_ITEMS: &str = "cartItems";

/// JSON array of items saved for later.
pub const SAVED_ITEMS: &str = "savedItems";

/// Promo code applied on the cart page.
pub const PROMO_CODE: &str = "appliedPromo";

/// `"true"` while a shopper is signed in.
pub const IS_AUTHENTICATED: &str = "isAuthenticated";

/// Email of the signed-in shopper.
pub const USER_EMAIL: &str = "userEmail";

/// Display name of the signed-in shopper.
pub const USER_NAME: &str = "userName";

/// Keys that make up the signed-in session.
pub const SESSION_KEYS: [&str; 3] = [IS_AUTHENTICATED, USER_EMAIL, USER_NAME];
