use utoipa::OpenApi;

use crate::domain::catalog::{Brand, BrandInput, Category, CategoryInput, Product, ProductInput, ProductView};
use crate::domain::order::{NewOrderItem, Order, OrderInput, OrderItem, OrderTotal, OrderView};
use crate::domain::party::{
    Customer, CustomerInput, Staff, StaffInput, StaffReportLine, StaffView, Store, StoreInput,
};
use crate::domain::promo_code::{PromoCode, PromoCodeInput};
use crate::domain::stock::{SendProduct, Stock, StockInput, StockProduct, StoreStock, TransferReceipt};
use crate::handlers::{self, Created, PatchRequest};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Retail service API",
        description = "Catalog, stores, staff, customers, stock and orders of a bike retailer."
    ),
    paths(
        handlers::catalog::create_brand,
        handlers::catalog::list_brands,
        handlers::catalog::get_brand,
        handlers::catalog::update_brand,
        handlers::catalog::delete_brand,
        handlers::catalog::create_category,
        handlers::catalog::list_categories,
        handlers::catalog::get_category,
        handlers::catalog::update_category,
        handlers::catalog::delete_category,
        handlers::catalog::create_product,
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::catalog::update_product,
        handlers::catalog::delete_product,
        handlers::stores::create_store,
        handlers::stores::list_stores,
        handlers::stores::get_store,
        handlers::stores::update_store,
        handlers::stores::patch_store,
        handlers::stores::delete_store,
        handlers::customers::create_customer,
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::update_customer,
        handlers::customers::patch_customer,
        handlers::customers::delete_customer,
        handlers::staff::create_staff,
        handlers::staff::list_staff,
        handlers::staff::get_staff,
        handlers::staff::update_staff,
        handlers::staff::patch_staff,
        handlers::staff::delete_staff,
        handlers::staff::staff_report,
        handlers::promo_codes::create_code,
        handlers::promo_codes::list_codes,
        handlers::promo_codes::get_code,
        handlers::promo_codes::update_code,
        handlers::promo_codes::delete_code,
        handlers::stocks::create_stock,
        handlers::stocks::list_stock,
        handlers::stocks::get_store_stock,
        handlers::stocks::update_stock,
        handlers::stocks::delete_stock,
        handlers::stocks::send_product,
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order,
        handlers::orders::patch_order,
        handlers::orders::delete_order,
        handlers::orders::add_item,
        handlers::orders::remove_item,
        handlers::orders::total_sum,
    ),
    components(schemas(
        Created,
        PatchRequest,
        Brand,
        BrandInput,
        Category,
        CategoryInput,
        Product,
        ProductInput,
        ProductView,
        Store,
        StoreInput,
        Customer,
        CustomerInput,
        Staff,
        StaffInput,
        StaffView,
        StaffReportLine,
        PromoCode,
        PromoCodeInput,
        Stock,
        StockInput,
        StockProduct,
        StoreStock,
        SendProduct,
        TransferReceipt,
        Order,
        OrderInput,
        OrderItem,
        NewOrderItem,
        OrderView,
        OrderTotal,
    )),
    tags(
        (name = "catalog", description = "Brands, categories and products"),
        (name = "stores", description = "Store locations"),
        (name = "customers", description = "Customer records"),
        (name = "staff", description = "Staff members and sales report"),
        (name = "promo codes", description = "Discount codes"),
        (name = "stock", description = "Per-store stock and transfers"),
        (name = "orders", description = "Orders, items and totals"),
    )
)]
pub struct ApiDoc;
