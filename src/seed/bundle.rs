use crate::client::{BundleApi, ProductApi};
use crate::error::SeedError;
use crate::model::{generate_id, BundleOption, BundleSet, Product};
use crate::seed::catalog::{ProductDraft, UnassignedProduct};

/// A bundle offering `articles` with matching per-option price adjustments.
/// The articles must already exist at the bundle's location; the API is the
/// one that rejects a dangling reference.
pub fn bundle_set(
    name: &str,
    position: u32,
    min_quantity: u32,
    max_quantity: u32,
    articles: &[(&Product, f64)],
) -> BundleSet {
    BundleSet {
        id: generate_id(),
        name: name.to_string(),
        position,
        min_quantity,
        max_quantity,
        options: articles
            .iter()
            .map(|(article, price_adjustment)| BundleOption {
                id: generate_id(),
                article_id: article.id.clone(),
                price_adjustment: *price_adjustment,
            })
            .collect(),
    }
}

#[derive(Debug, Clone)]
pub struct BundleDraft<'a> {
    pub product: ProductDraft<'a>,
    pub bundle_sets: Vec<BundleSet>,
}

/// First phase of bundle creation; see `catalog::insert_product`.
pub async fn insert_bundle<A>(api: &A, draft: &BundleDraft<'_>) -> Result<UnassignedProduct, SeedError>
where
    A: BundleApi + ?Sized,
{
    let product = api
        .create_bundle(
            &draft.product.location.id,
            &draft.bundle_sets,
            &draft.product.to_request(),
        )
        .await?;
    Ok(UnassignedProduct::new(product, draft.product.modifier_set_ids()))
}

pub async fn create_bundle<A>(api: &A, draft: &BundleDraft<'_>) -> Result<Product, SeedError>
where
    A: BundleApi + ProductApi + ?Sized,
{
    insert_bundle(api, draft).await?.assign_modifier_sets(api).await
}
