//! The product catalog: categories, subcategories and items.

mod category;
mod item;
mod list;
mod page;
mod subcategory;

pub use category::{
    Category, NewCategory, create_category, create_category_table, get_published_category,
    get_published_categories,
};
pub use item::{Item, NewItem, create_item, create_item_table, get_published_items};
pub use list::{list_categories_endpoint, list_items_endpoint, list_subcategories_endpoint};
pub use page::{get_catalog_page, get_collection_page};
pub use subcategory::{
    NewSubcategory, Subcategory, create_subcategory, create_subcategory_table,
    get_published_subcategories,
};
