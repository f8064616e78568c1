//! Catalog browsing commands.

use digital_market_core::{Category, Product, ProductId};
use digital_market_storefront::services::CatalogFilter;
use digital_market_storefront::{AppError, Result, Storefront};

/// List products, optionally narrowed by category, search text or the
/// featured flag.
///
/// # Errors
///
/// Returns an error if the catalog service fails.
pub async fn list(
    storefront: &Storefront,
    category: Option<Category>,
    search: Option<String>,
    featured: bool,
) -> Result<()> {
    let filter = CatalogFilter { category, search };
    list_filtered(storefront, &filter, featured).await
}

/// List the products that pass `filter`.
///
/// # Errors
///
/// Returns an error if the catalog service fails.
#[allow(clippy::print_stdout)]
pub async fn list_filtered(
    storefront: &Storefront,
    filter: &CatalogFilter,
    featured: bool,
) -> Result<()> {
    let catalog = storefront.catalog();
    let products = match (featured, filter.category) {
        (true, _) => catalog.list_featured().await?,
        (false, Some(category)) => catalog.list_by_category(category).await?,
        (false, None) => catalog.list_all().await?,
    };
    let products = filter.apply(&products);

    if products.is_empty() {
        println!("No products found");
        return Ok(());
    }
    for product in &products {
        print_row(product);
    }
    println!();
    println!("{} product(s)", products.len());
    Ok(())
}

/// The home page: featured products.
///
/// # Errors
///
/// Returns an error if the catalog service fails.
#[allow(clippy::print_stdout)]
pub async fn home(storefront: &Storefront) -> Result<()> {
    println!("Featured");
    for product in storefront.catalog().list_featured().await? {
        print_row(&product);
    }
    println!();
    println!(
        "Browse: {}",
        Category::ALL
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

/// Show one product with the quantity already in the cart.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no product has this ID.
#[allow(clippy::print_stdout)]
pub async fn show(storefront: &Storefront, id: &ProductId) -> Result<()> {
    let product = storefront
        .catalog()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_owned()))?;

    println!("{}", product.title);
    println!("{}  ·  {}", product.price, product.category.label());
    println!();
    println!("{}", product.description);
    println!();
    println!("Image: {}", product.image_url);

    let in_cart = storefront.open_cart().quantity_of(&product.id);
    if in_cart > 0 {
        println!("In cart: {in_cart}");
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_row(product: &Product) {
    let marker = if product.featured { "*" } else { " " };
    println!(
        "{marker} {:>4}  {:<45} {:>9}  {}",
        product.id,
        product.title,
        product.price.to_string(),
        product.category.label()
    );
}
