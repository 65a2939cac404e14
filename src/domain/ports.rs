use super::catalog::{Brand, BrandInput, Category, CategoryInput, ProductInput, ProductView};
use super::errors::DomainError;
use super::order::{NewOrderItem, Order, OrderInput, OrderItem, OrderView};
use super::page::{ListQuery, Page};
use super::party::{
    Customer, CustomerInput, StaffInput, StaffReportLine, StaffView, Store, StoreInput,
};
use super::patch::PatchSet;
use super::pricing::LineAmount;
use super::promo_code::{PromoCode, PromoCodeInput};
use super::stock::{SendProduct, Stock, StockInput, StoreStock, TransferReceipt};

// Update, patch and delete return the affected row count; callers decide
// whether zero is an error.

pub trait BrandRepository: Send + Sync + 'static {
    fn create(&self, input: &BrandInput) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Brand>, DomainError>;
    fn list(&self, query: &ListQuery) -> Result<Page<Brand>, DomainError>;
    fn update(&self, id: i32, input: &BrandInput) -> Result<usize, DomainError>;
    fn delete(&self, id: i32) -> Result<usize, DomainError>;
}

pub trait CategoryRepository: Send + Sync + 'static {
    fn create(&self, input: &CategoryInput) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Category>, DomainError>;
    fn list(&self, query: &ListQuery) -> Result<Page<Category>, DomainError>;
    fn update(&self, id: i32, input: &CategoryInput) -> Result<usize, DomainError>;
    fn delete(&self, id: i32) -> Result<usize, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn create(&self, input: &ProductInput) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<ProductView>, DomainError>;
    fn list(&self, query: &ListQuery) -> Result<Page<ProductView>, DomainError>;
    fn update(&self, id: i32, input: &ProductInput) -> Result<usize, DomainError>;
    fn delete(&self, id: i32) -> Result<usize, DomainError>;
}

pub trait StoreRepository: Send + Sync + 'static {
    fn create(&self, input: &StoreInput) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Store>, DomainError>;
    fn list(&self, query: &ListQuery) -> Result<Page<Store>, DomainError>;
    fn update(&self, id: i32, input: &StoreInput) -> Result<usize, DomainError>;
    fn patch(&self, patch: &PatchSet) -> Result<usize, DomainError>;
    fn delete(&self, id: i32) -> Result<usize, DomainError>;
}

pub trait CustomerRepository: Send + Sync + 'static {
    fn create(&self, input: &CustomerInput) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;
    fn list(&self, query: &ListQuery) -> Result<Page<Customer>, DomainError>;
    fn update(&self, id: i32, input: &CustomerInput) -> Result<usize, DomainError>;
    fn patch(&self, patch: &PatchSet) -> Result<usize, DomainError>;
    fn delete(&self, id: i32) -> Result<usize, DomainError>;
}

pub trait StaffRepository: Send + Sync + 'static {
    fn create(&self, input: &StaffInput) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<StaffView>, DomainError>;
    fn list(&self, query: &ListQuery) -> Result<Page<StaffView>, DomainError>;
    fn report(&self, query: &ListQuery) -> Result<Page<StaffReportLine>, DomainError>;
    fn update(&self, id: i32, input: &StaffInput) -> Result<usize, DomainError>;
    fn patch(&self, patch: &PatchSet) -> Result<usize, DomainError>;
    fn delete(&self, id: i32) -> Result<usize, DomainError>;
}

pub trait PromoCodeRepository: Send + Sync + 'static {
    fn create(&self, input: &PromoCodeInput) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<PromoCode>, DomainError>;
    /// Case-insensitive lookup by `code_name`.
    fn find_by_name(&self, name: &str) -> Result<Option<PromoCode>, DomainError>;
    fn list(&self, query: &ListQuery) -> Result<Page<PromoCode>, DomainError>;
    fn update(&self, id: i32, input: &PromoCodeInput) -> Result<usize, DomainError>;
    fn delete(&self, id: i32) -> Result<usize, DomainError>;
}

pub trait StockRepository: Send + Sync + 'static {
    fn create(&self, input: &StockInput) -> Result<Stock, DomainError>;
    fn find_by_store(&self, store_id: i32) -> Result<Option<StoreStock>, DomainError>;
    fn list(&self, query: &ListQuery) -> Result<Page<StoreStock>, DomainError>;
    fn set_quantity(&self, input: &StockInput) -> Result<usize, DomainError>;
    fn delete(&self, store_id: i32, product_id: i32) -> Result<usize, DomainError>;
    /// Moves units between two stores in one transaction.
    fn transfer(&self, request: &SendProduct) -> Result<TransferReceipt, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, input: &OrderInput) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError>;
    fn list(&self, query: &ListQuery) -> Result<Page<Order>, DomainError>;
    fn update(&self, id: i32, input: &OrderInput) -> Result<usize, DomainError>;
    fn patch(&self, patch: &PatchSet) -> Result<usize, DomainError>;
    fn delete(&self, id: i32) -> Result<usize, DomainError>;
    /// Reserves stock in the order's store and appends the item, atomically.
    fn add_item(&self, order_id: i32, item: &NewOrderItem) -> Result<OrderItem, DomainError>;
    /// Deletes the item and returns its quantity to the order's store.
    fn remove_item(&self, order_id: i32, item_id: i32) -> Result<Option<OrderItem>, DomainError>;
    fn line_amounts(&self, order_id: i32) -> Result<Vec<LineAmount>, DomainError>;
}
