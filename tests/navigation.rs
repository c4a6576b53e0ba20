//! Router dispatch against live commerce state.
//!
//! The renderer here is a stand-in for the HTML layer: it reads the current
//! collections for each route and records a one-line summary, which is all
//! the engine promises a real view layer.

use testresult::TestResult;

use vitrine::prelude::*;

/// Renders each route as a short text summary of the relevant state.
struct SummaryRenderer<'a> {
    commerce: &'a Commerce<MemoryStore>,
    lines: Vec<String>,
}

impl ViewRenderer for SummaryRenderer<'_> {
    fn render(&mut self, route: &Route) {
        let summary = match route {
            Route::Home => format!(
                "home: {} featured",
                self.commerce.catalog().featured(4).count()
            ),
            Route::Category(name) => format!(
                "category {name}: {} products",
                self.commerce.catalog().in_category(name).count()
            ),
            Route::Product(id) => match self.commerce.catalog().find_by_id(id) {
                Some(product) => format!("product: {}", product.name),
                None => "404".to_owned(),
            },
            Route::Cart => format!("cart: {} units", self.commerce.cart().unit_count()),
            Route::Search(query) => format!(
                "search {query}: {} hits",
                self.commerce.catalog().search(query).count()
            ),
            Route::Confirmation(order_id) => match self.commerce.order(order_id) {
                Some(order) => format!("confirmed: {}", order.id),
                None => "404".to_owned(),
            },
            Route::Orders => format!("orders: {}", self.commerce.orders().len()),
            Route::Wishlist => format!("wishlist: {}", self.commerce.wishlist().len()),
            Route::NotFound(segment) => format!("404: {segment}"),
            other => format!("{other:?}"),
        };

        self.lines.push(summary);
    }
}

#[test]
fn routes_read_current_state() -> TestResult {
    let mut shop = Storefront::open(MemoryStore::new(), CommerceConfig::default())?;
    shop.commerce_mut().add_to_cart("1", 2)?;
    let placed = shop.commerce_mut().checkout()?;
    shop.commerce_mut().add_to_cart("3", 1)?;

    let mut router = Router::new();
    let mut renderer = SummaryRenderer {
        commerce: shop.commerce(),
        lines: Vec::new(),
    };

    router.navigate("/", &mut renderer);
    router.navigate("/category/Laptops", &mut renderer);
    router.navigate("/cart", &mut renderer);
    router.navigate(&format!("/confirmation/{}", placed.id), &mut renderer);
    router.navigate("/orders", &mut renderer);

    assert_eq!(
        renderer.lines,
        vec![
            "home: 4 featured".to_owned(),
            "category Laptops: 2 products".to_owned(),
            "cart: 1 units".to_owned(),
            format!("confirmed: {}", placed.id),
            "orders: 1".to_owned(),
        ]
    );

    Ok(())
}

#[test]
fn encoded_category_names_reach_the_view_decoded() -> TestResult {
    let shop = Storefront::open(MemoryStore::new(), CommerceConfig::default())?;

    let mut router = Router::new();
    let mut renderer = SummaryRenderer {
        commerce: shop.commerce(),
        lines: Vec::new(),
    };

    router.navigate("/category/Power%20Banks", &mut renderer);

    assert_eq!(
        renderer.lines,
        vec!["category Power Banks: 0 products".to_owned()]
    );
    assert_eq!(router.current(), &Route::Category("Power Banks".to_owned()));

    Ok(())
}

#[test]
fn unknown_paths_render_not_found() -> TestResult {
    let shop = Storefront::open(MemoryStore::new(), CommerceConfig::default())?;

    let mut router = Router::new();
    let mut renderer = SummaryRenderer {
        commerce: shop.commerce(),
        lines: Vec::new(),
    };

    router.navigate("/warehouse/9", &mut renderer);

    assert_eq!(renderer.lines, vec!["404: warehouse".to_owned()]);

    Ok(())
}
