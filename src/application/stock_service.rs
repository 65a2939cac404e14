use crate::domain::errors::{require_affected, DomainError};
use crate::domain::page::{ListQuery, Page};
use crate::domain::ports::StockRepository;
use crate::domain::stock::{SendProduct, Stock, StockInput, StoreStock, TransferReceipt};

pub struct StockService<S> {
    repo: S,
}

impl<S: StockRepository> StockService<S> {
    pub fn new(repo: S) -> Self {
        Self { repo }
    }

    pub fn create_stock(&self, input: &StockInput) -> Result<Stock, DomainError> {
        input.validate()?;
        self.repo.create(input)
    }

    pub fn get_store_stock(&self, store_id: i32) -> Result<StoreStock, DomainError> {
        self.repo
            .find_by_store(store_id)?
            .ok_or(DomainError::NotFound("Stock"))
    }

    pub fn list_stock(&self, query: &ListQuery) -> Result<Page<StoreStock>, DomainError> {
        self.repo.list(query)
    }

    pub fn set_quantity(&self, input: &StockInput) -> Result<(), DomainError> {
        input.validate()?;
        require_affected(self.repo.set_quantity(input)?, "Stock")
    }

    pub fn delete_stock(&self, store_id: i32, product_id: i32) -> Result<(), DomainError> {
        require_affected(self.repo.delete(store_id, product_id)?, "Stock")
    }

    pub fn send_product(&self, request: &SendProduct) -> Result<TransferReceipt, DomainError> {
        request.validate()?;
        match self.repo.transfer(request) {
            Ok(receipt) => {
                log::info!(
                    "moved {} x product {} from store {} to store {} ({} left)",
                    request.quantity,
                    request.product_id,
                    request.sender_id,
                    request.receiver_id,
                    receipt.sender.quantity
                );
                Ok(receipt)
            }
            Err(e) => {
                log::warn!(
                    "transfer of {} x product {} from store {} to store {} rejected: {}",
                    request.quantity,
                    request.product_id,
                    request.sender_id,
                    request.receiver_id,
                    e
                );
                Err(e)
            }
        }
    }
}
