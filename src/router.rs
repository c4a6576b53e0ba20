//! Router
//!
//! Pure mapping from a navigation path to a named view request. The first
//! path segment selects the route, the second (if any) is its parameter.
//! Free-text parameters (category names, search queries) are percent
//! decoded; opaque identifiers (product ids, order ids) are left raw.

use percent_encoding::percent_decode_str;

/// A named view request, one variant per route the storefront serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page with the featured products.
    Home,

    /// Product listing for one category (decoded name).
    Category(String),

    /// Single product page (raw product id).
    Product(String),

    /// Shopping cart.
    Cart,

    /// Checkout form.
    Checkout,

    /// Order confirmation (raw order id).
    Confirmation(String),

    /// Account dashboard.
    Account,

    /// Order history.
    Orders,

    /// Saved items.
    Wishlist,

    /// Search results (decoded query).
    Search(String),

    /// Login placeholder.
    Login,

    /// Registration placeholder.
    Register,

    /// About page.
    About,

    /// Contact page.
    Contact,

    /// Frequently asked questions.
    Faq,

    /// Terms of service.
    Terms,

    /// Privacy policy.
    Privacy,

    /// Shipping policy.
    ShippingPolicy,

    /// Return policy.
    ReturnPolicy,

    /// Unrecognized route name (the offending segment).
    NotFound(String),
}

impl Route {
    /// Parse a navigation path.
    ///
    /// A leading `#` is tolerated, segments are split on `/` and empty
    /// segments dropped; a missing parameter is the empty string.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.strip_prefix('#').unwrap_or(path);
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());

        let name = segments.next().unwrap_or("");
        let param = segments.next().unwrap_or("");

        match name {
            "" => Self::Home,
            "category" => Self::Category(decode(param)),
            "product" => Self::Product(param.to_owned()),
            "cart" => Self::Cart,
            "checkout" => Self::Checkout,
            "confirmation" => Self::Confirmation(param.to_owned()),
            "account" => Self::Account,
            "orders" => Self::Orders,
            "wishlist" => Self::Wishlist,
            "search" => Self::Search(decode(param)),
            "login" => Self::Login,
            "register" => Self::Register,
            "about" => Self::About,
            "contact" => Self::Contact,
            "faq" => Self::Faq,
            "terms" => Self::Terms,
            "privacy" => Self::Privacy,
            "shipping-policy" => Self::ShippingPolicy,
            "return-policy" => Self::ReturnPolicy,
            other => Self::NotFound(other.to_owned()),
        }
    }
}

fn decode(param: &str) -> String {
    percent_decode_str(param).decode_utf8_lossy().into_owned()
}

/// The presentation seam: given a route, produce the view.
///
/// Rendering is entirely outside this crate's scope; the router only
/// guarantees each navigation fully replaces the previous view.
pub trait ViewRenderer {
    /// Render the view for `route`, replacing whatever was shown before.
    fn render(&mut self, route: &Route);
}

/// Dispatches navigation paths to a [`ViewRenderer`].
///
/// Holds no state beyond the current route. Navigations are serialized by
/// construction: [`Router::navigate`] takes `&mut self`, so a render can
/// never observe or start another navigation on the same router and "last
/// navigation wins" cannot interleave partial renders.
#[derive(Debug)]
pub struct Router {
    current: Route,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a router positioned at the home route.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Route::Home,
        }
    }

    /// Parse `path`, render its view and make it the current route.
    ///
    /// Rendering runs to completion before this returns; the exclusive
    /// borrow means no second navigation can start in between.
    pub fn navigate(&mut self, path: &str, renderer: &mut dyn ViewRenderer) -> &Route {
        let route = Route::parse(path);

        renderer.render(&route);
        self.current = route;

        &self.current
    }

    /// The most recently rendered route.
    pub fn current(&self) -> &Route {
        &self.current
    }
}
