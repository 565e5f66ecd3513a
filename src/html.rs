use maud::{DOCTYPE, Markup, html};

use crate::endpoints;

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "inline-block px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 hover:bg-blue-600 hover:dark:bg-blue-700 text-white rounded";

// Card styles
pub const CARD_STYLE: &str = "flex flex-col overflow-hidden rounded-lg bg-white \
    dark:bg-gray-800 shadow";
pub const CARD_IMAGE_STYLE: &str = "h-48 w-full object-cover";
pub const CARD_BODY_STYLE: &str = "flex flex-col gap-2 p-4";
pub const CARD_TITLE_STYLE: &str = "text-lg font-semibold tracking-wide";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";
pub const GRID_STYLE: &str = "grid w-full max-w-screen-xl gap-6 sm:grid-cols-2 lg:grid-cols-3";

/// The image shown on category cards that do not have their own.
pub const DEFAULT_HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1520975867597-0f1a6f36f06b?q=80&w=1200&auto=format&fit=crop";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Uniformity" }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a href=(endpoints::CATALOG_VIEW) class=(LINK_STYLE) { "Back to the catalog" }
                }
            }
        }
    );

    base(title, &content)
}

/// Format a price in rupees, or the enquiry text if the item has no price.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) if price > 0.0 => format!("₹{price:.2}"),
        _ => "Contact for Price".to_owned(),
    }
}
