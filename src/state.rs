use crate::application::order_service::OrderService;
use crate::application::stock_service::StockService;
use crate::db::DbPool;
use crate::infrastructure::catalog_repo::{
    DieselBrandRepository, DieselCategoryRepository, DieselProductRepository,
};
use crate::infrastructure::customer_repo::DieselCustomerRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::promo_code_repo::DieselPromoCodeRepository;
use crate::infrastructure::staff_repo::DieselStaffRepository;
use crate::infrastructure::stock_repo::DieselStockRepository;
use crate::infrastructure::store_repo::DieselStoreRepository;

/// Everything the handlers need, built once per process and shared through
/// `web::Data`.
pub struct AppState {
    pub brands: DieselBrandRepository,
    pub categories: DieselCategoryRepository,
    pub products: DieselProductRepository,
    pub stores: DieselStoreRepository,
    pub customers: DieselCustomerRepository,
    pub staff: DieselStaffRepository,
    pub promo_codes: DieselPromoCodeRepository,
    pub stock: StockService<DieselStockRepository>,
    pub orders: OrderService<DieselOrderRepository, DieselPromoCodeRepository>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            brands: DieselBrandRepository::new(pool.clone()),
            categories: DieselCategoryRepository::new(pool.clone()),
            products: DieselProductRepository::new(pool.clone()),
            stores: DieselStoreRepository::new(pool.clone()),
            customers: DieselCustomerRepository::new(pool.clone()),
            staff: DieselStaffRepository::new(pool.clone()),
            promo_codes: DieselPromoCodeRepository::new(pool.clone()),
            stock: StockService::new(DieselStockRepository::new(pool.clone())),
            orders: OrderService::new(
                DieselOrderRepository::new(pool.clone()),
                DieselPromoCodeRepository::new(pool),
            ),
        }
    }
}
