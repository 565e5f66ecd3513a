//! Server-rendered catalog pages: the category grid and a single category's collection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    catalog::{
        Category, Item, Subcategory, get_published_categories, get_published_category,
        get_published_items, get_published_subcategories,
        list::{CatalogState, resolve_parameter},
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_BODY_STYLE, CARD_IMAGE_STYLE, CARD_STYLE, CARD_TITLE_STYLE,
        DEFAULT_HERO_IMAGE, GRID_STYLE, PAGE_CONTAINER_STYLE, base, error_view, format_price,
    },
    resolver::EntityKind,
};

/// Render the grid of published categories.
pub async fn get_catalog_page(State(state): State<CatalogState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return error_page(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match get_published_categories(&connection) {
        Ok(categories) => catalog_view(&categories).into_response(),
        Err(error) => {
            tracing::error!("could not get categories for the catalog page: {error}");
            error_page(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Render the subcategories and items of the category identified by the path.
///
/// The path segment may be a category ID, slug or partial title.
pub async fn get_collection_page(
    State(state): State<CatalogState>,
    Path(identifier): Path<String>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return error_page(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let collection = resolve_parameter(Some(identifier.as_str()), EntityKind::Category, &connection)
        .map(|key| key.unwrap_or(identifier))
        .and_then(|key| {
            let category = get_published_category(&key, &connection)?;
            let subcategories = get_published_subcategories(Some(&key), &connection)?;
            let items = get_published_items(Some(&key), None, &connection)?;

            Ok((category, subcategories, items))
        });

    match collection {
        Ok((category, subcategories, items)) => {
            collection_view(&category, &subcategories, &items).into_response()
        }
        Err(Error::NotFound) => error_page(StatusCode::NOT_FOUND),
        Err(error) => {
            tracing::error!("could not get the collection page: {error}");
            error_page(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn error_page(status: StatusCode) -> Response {
    let markup = if status == StatusCode::NOT_FOUND {
        error_view(
            "Not Found",
            "404",
            "We couldn't find that collection.",
            "Check the link or browse all of our uniforms.",
        )
    } else {
        error_view(
            "Error",
            "500",
            "Sorry, something went wrong.",
            "Try again later.",
        )
    };

    (status, markup).into_response()
}

fn category_card(category: &Category) -> Markup {
    let link_target = if category.slug.is_empty() {
        &category.id
    } else {
        &category.slug
    };
    let link = format_endpoint(endpoints::COLLECTION_VIEW, link_target);
    let image = category.hero_image.as_deref().unwrap_or(DEFAULT_HERO_IMAGE);
    let button_text = category
        .button_text
        .as_deref()
        .unwrap_or("See Our Collection");

    html! {
        div class=(CARD_STYLE) data-category=(category.id)
        {
            img class=(CARD_IMAGE_STYLE) src=(image) alt=(category.title);

            div class=(CARD_BODY_STYLE)
            {
                h2 class=(CARD_TITLE_STYLE) { (category.title.to_uppercase()) }
                p { (category.description) }
                a class=(BUTTON_PRIMARY_STYLE) href=(link) { (button_text) }
            }
        }
    }
}

fn catalog_view(categories: &[Category]) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="mb-6 text-3xl font-bold" { "Our Uniforms" }

            @if categories.is_empty() {
                p { "No collections are available right now." }
            } @else {
                div class=(GRID_STYLE)
                {
                    @for category in categories {
                        (category_card(category))
                    }
                }
            }
        }
    };

    base("Uniforms", &content)
}

fn item_card(item: &Item) -> Markup {
    html! {
        div class=(CARD_STYLE) data-item=(item.id)
        {
            @if let Some(image) = &item.image {
                img class=(CARD_IMAGE_STYLE) src=(image) alt=(item.title);
            }

            div class=(CARD_BODY_STYLE)
            {
                h3 class=(CARD_TITLE_STYLE) { (item.title) }
                @if let Some(description) = &item.short_description {
                    p { (description) }
                }
                p class="font-semibold" { (format_price(item.price)) }
            }
        }
    }
}

fn collection_view(category: &Category, subcategories: &[Subcategory], items: &[Item]) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="mb-2 text-3xl font-bold" { (category.title) }
            p class="mb-6" { (category.description) }

            @if !subcategories.is_empty() {
                ul class="mb-6 flex flex-wrap gap-2"
                {
                    @for subcategory in subcategories {
                        li data-subcategory=(subcategory.id) { (subcategory.title) }
                    }
                }
            }

            @if items.is_empty() {
                p { "No items available in this category." }
            } @else {
                div class=(GRID_STYLE)
                {
                    @for item in items {
                        (item_card(item))
                    }
                }
            }
        }
    };

    base(&category.title, &content)
}
