//! Schema contract for the products table.
//!
//! Column names, the content authority, and the addresses that identify the
//! table. Everything here is a process-wide constant.

/// Authority part of every product address.
pub const CONTENT_AUTHORITY: &str = "com.example.android.inventoryapp";

/// Scheme used by product addresses.
pub const CONTENT_SCHEME: &str = "content";

/// Path segment naming the products collection.
pub const PATH_PRODUCTS: &str = "products";

/// Address of the whole products collection.
pub const CONTENT_URI: &str = "content://com.example.android.inventoryapp/products";

/// Content type of a list of products.
pub const CONTENT_LIST_TYPE: &str =
    "vnd.android.cursor.dir/com.example.android.inventoryapp/products";

/// Content type of a single product.
pub const CONTENT_ITEM_TYPE: &str =
    "vnd.android.cursor.item/com.example.android.inventoryapp/products";

/// Name of the products table.
pub const TABLE_NAME: &str = "products";

/// File name of the on-disk table snapshot.
pub const DATABASE_NAME: &str = "inventory.json";

/// Current schema version. Older snapshots are bumped to this on open.
pub const DATABASE_VERSION: u32 = 1;

pub const COLUMN_ID: &str = "_id";
pub const COLUMN_PRODUCT_NAME: &str = "name";
pub const COLUMN_PRODUCT_PRICE: &str = "price";
pub const COLUMN_PRODUCT_QUANTITY: &str = "quantity";
pub const COLUMN_PRODUCT_SUPPLIER_NAME: &str = "supplierName";
pub const COLUMN_PRODUCT_SUPPLIER_CONTACT: &str = "supplierContact";

/// Address of a single product (the collection address with the id appended).
pub fn item_address(id: u64) -> String {
    format!("{}/{}", CONTENT_URI, id)
}
