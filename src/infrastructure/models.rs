use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::catalog::{Brand, Category, Product};
use crate::domain::order::{Order, OrderItem};
use crate::domain::party::{Customer, Staff, Store};
use crate::domain::promo_code::PromoCode;
use crate::domain::stock::Stock;
use crate::schema::{
    brands, categories, customers, order_items, orders, products, promo_codes, staffs, stocks,
    stores,
};

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = brands)]
#[diesel(primary_key(brand_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BrandRow {
    pub brand_id: i32,
    pub brand_name: String,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = brands)]
pub struct BrandChanges<'a> {
    pub brand_name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = categories)]
#[diesel(primary_key(category_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub category_id: i32,
    pub category_name: String,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = categories)]
pub struct CategoryChanges<'a> {
    pub category_name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(primary_key(product_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub product_id: i32,
    pub product_name: String,
    pub brand_id: i32,
    pub category_id: i32,
    pub model_year: i16,
    pub list_price: BigDecimal,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = products)]
pub struct ProductChanges<'a> {
    pub product_name: &'a str,
    pub brand_id: i32,
    pub category_id: i32,
    pub model_year: i16,
    pub list_price: &'a BigDecimal,
}

// ── Stores, staff, customers ─────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = stores)]
#[diesel(primary_key(store_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoreRow {
    pub store_id: i32,
    pub store_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Full replacement: `None` writes NULL.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = stores)]
#[diesel(treat_none_as_null = true)]
pub struct StoreChanges<'a> {
    pub store_name: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub street: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub zip_code: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(primary_key(customer_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = customers)]
#[diesel(treat_none_as_null = true)]
pub struct CustomerChanges<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: Option<&'a str>,
    pub email: &'a str,
    pub street: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub zip_code: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = staffs)]
#[diesel(primary_key(staff_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StaffRow {
    pub staff_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub active: bool,
    pub store_id: i32,
    pub manager_id: Option<i32>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = staffs)]
#[diesel(treat_none_as_null = true)]
pub struct StaffChanges<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub active: bool,
    pub store_id: i32,
    pub manager_id: Option<i32>,
}

// ── Promo codes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = promo_codes)]
#[diesel(primary_key(code_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PromoCodeRow {
    pub code_id: i32,
    pub code_name: String,
    pub discount: BigDecimal,
    pub discount_type: String,
    pub order_limit_price: BigDecimal,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = promo_codes)]
pub struct PromoCodeChanges<'a> {
    pub code_name: &'a str,
    pub discount: &'a BigDecimal,
    pub discount_type: String,
    pub order_limit_price: &'a BigDecimal,
}

// ── Stock ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Insertable, Identifiable)]
#[diesel(table_name = stocks)]
#[diesel(primary_key(store_id, product_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StockRow {
    pub store_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub order_id: i32,
    pub customer_id: i32,
    pub order_status: i16,
    pub order_date: NaiveDate,
    pub required_date: NaiveDate,
    pub shipped_date: Option<NaiveDate>,
    pub store_id: i32,
    pub staff_id: i32,
    pub promo_code: Option<i32>,
}

/// A `None` in `order_date` inserts the column default (today).
#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub customer_id: i32,
    pub order_status: i16,
    pub order_date: Option<NaiveDate>,
    pub required_date: NaiveDate,
    pub shipped_date: Option<NaiveDate>,
    pub store_id: i32,
    pub staff_id: i32,
    pub promo_code: Option<i32>,
}

/// Full replacement. `order_date` is kept when absent; the nullable
/// columns are always written (`Some(None)` is NULL).
#[derive(Debug, AsChangeset)]
#[diesel(table_name = orders)]
pub struct OrderChanges {
    pub customer_id: i32,
    pub order_status: i16,
    pub order_date: Option<NaiveDate>,
    pub required_date: NaiveDate,
    pub shipped_date: Option<Option<NaiveDate>>,
    pub store_id: i32,
    pub staff_id: i32,
    pub promo_code: Option<Option<i32>>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(primary_key(order_id, item_id))]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub order_id: i32,
    pub item_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub list_price: BigDecimal,
    pub discount: BigDecimal,
}

// ── Row → domain ─────────────────────────────────────────────────────────────

impl From<BrandRow> for Brand {
    fn from(r: BrandRow) -> Self {
        Brand {
            brand_id: r.brand_id,
            brand_name: r.brand_name,
        }
    }
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category {
            category_id: r.category_id,
            category_name: r.category_name,
        }
    }
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            product_id: r.product_id,
            product_name: r.product_name,
            brand_id: r.brand_id,
            category_id: r.category_id,
            model_year: r.model_year,
            list_price: r.list_price,
        }
    }
}

impl From<StoreRow> for Store {
    fn from(r: StoreRow) -> Self {
        Store {
            store_id: r.store_id,
            store_name: r.store_name,
            phone: r.phone,
            email: r.email,
            street: r.street,
            city: r.city,
            state: r.state,
            zip_code: r.zip_code,
        }
    }
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Customer {
            customer_id: r.customer_id,
            first_name: r.first_name,
            last_name: r.last_name,
            phone: r.phone,
            email: r.email,
            street: r.street,
            city: r.city,
            state: r.state,
            zip_code: r.zip_code,
        }
    }
}

impl From<StaffRow> for Staff {
    fn from(r: StaffRow) -> Self {
        Staff {
            staff_id: r.staff_id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            active: r.active,
            store_id: r.store_id,
            manager_id: r.manager_id,
        }
    }
}

impl From<PromoCodeRow> for PromoCode {
    fn from(r: PromoCodeRow) -> Self {
        PromoCode {
            code_id: r.code_id,
            code_name: r.code_name,
            discount: r.discount,
            discount_type: r.discount_type,
            order_limit_price: r.order_limit_price,
        }
    }
}

impl From<StockRow> for Stock {
    fn from(r: StockRow) -> Self {
        Stock {
            store_id: r.store_id,
            product_id: r.product_id,
            quantity: r.quantity,
        }
    }
}

impl From<OrderRow> for Order {
    fn from(r: OrderRow) -> Self {
        Order {
            order_id: r.order_id,
            customer_id: r.customer_id,
            order_status: r.order_status,
            order_date: r.order_date,
            required_date: r.required_date,
            shipped_date: r.shipped_date,
            store_id: r.store_id,
            staff_id: r.staff_id,
            promo_code: r.promo_code,
        }
    }
}

impl From<OrderItemRow> for OrderItem {
    fn from(r: OrderItemRow) -> Self {
        OrderItem {
            order_id: r.order_id,
            item_id: r.item_id,
            product_id: r.product_id,
            quantity: r.quantity,
            list_price: r.list_price,
            discount: r.discount,
        }
    }
}
