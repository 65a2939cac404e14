use bigdecimal::BigDecimal;
use diesel::dsl::count_distinct;
use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::page::{ListQuery, Page};
use crate::domain::ports::StockRepository;
use crate::domain::stock::{
    SendProduct, Stock, StockInput, StockProduct, StoreStock, TransferReceipt,
};
use crate::schema::{products, stocks};

use super::models::StockRow;

#[derive(Clone)]
pub struct DieselStockRepository {
    pool: DbPool,
}

impl DieselStockRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type StockLine = (
    i32,
    i32,
    i32,
    Option<String>,
    Option<i32>,
    Option<i32>,
    Option<i16>,
    Option<BigDecimal>,
);

/// Stock rows of the given stores with whatever product data still exists,
/// ordered by store then product.
fn load_lines(conn: &mut PgConnection, store_ids: Vec<i32>) -> QueryResult<Vec<StockLine>> {
    stocks::table
        .left_join(products::table)
        .filter(stocks::store_id.eq_any(store_ids))
        .order((stocks::store_id, stocks::product_id))
        .select((
            stocks::store_id,
            stocks::product_id,
            stocks::quantity,
            products::product_name.nullable(),
            products::brand_id.nullable(),
            products::category_id.nullable(),
            products::model_year.nullable(),
            products::list_price.nullable(),
        ))
        .load(conn)
}

fn group_by_store(lines: Vec<StockLine>) -> Vec<StoreStock> {
    let mut grouped: Vec<(i32, Vec<StockProduct>)> = Vec::new();
    for (store_id, product_id, quantity, name, brand_id, category_id, year, price) in lines {
        let product = StockProduct {
            product_id,
            product_name: name,
            brand_id,
            category_id,
            model_year: year,
            list_price: price,
            quantity,
        };
        match grouped.last_mut() {
            Some((current, products)) if *current == store_id => products.push(product),
            _ => grouped.push((store_id, vec![product])),
        }
    }
    grouped
        .into_iter()
        .map(|(store_id, products)| StoreStock::from_products(store_id, products))
        .collect()
}

impl StockRepository for DieselStockRepository {
    fn create(&self, input: &StockInput) -> Result<Stock, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(stocks::table)
            .values(&StockRow {
                store_id: input.store_id,
                product_id: input.product_id,
                quantity: input.quantity,
            })
            .returning(StockRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find_by_store(&self, store_id: i32) -> Result<Option<StoreStock>, DomainError> {
        let mut conn = self.pool.get()?;
        let lines = load_lines(&mut conn, vec![store_id])?;
        Ok(group_by_store(lines).pop())
    }

    fn list(&self, query: &ListQuery) -> Result<Page<StoreStock>, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let count: i64 = stocks::table
                .select(count_distinct(stocks::store_id))
                .get_result(conn)?;
            let store_ids: Vec<i32> = stocks::table
                .select(stocks::store_id)
                .distinct()
                .order(stocks::store_id)
                .offset(query.offset)
                .limit(query.limit)
                .load(conn)?;
            let lines = load_lines(conn, store_ids)?;
            Ok(Page {
                count,
                items: group_by_store(lines),
            })
        })
    }

    fn set_quantity(&self, input: &StockInput) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = diesel::update(stocks::table.find((input.store_id, input.product_id)))
            .set(stocks::quantity.eq(input.quantity))
            .execute(&mut conn)?;
        Ok(rows)
    }

    fn delete(&self, store_id: i32, product_id: i32) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(stocks::table.find((store_id, product_id))).execute(&mut conn)?)
    }

    fn transfer(&self, request: &SendProduct) -> Result<TransferReceipt, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            // Both rows are locked in store_id order so that opposite
            // transfers of the same product cannot deadlock.
            let locked: Vec<StockRow> = stocks::table
                .filter(stocks::product_id.eq(request.product_id))
                .filter(stocks::store_id.eq_any([request.sender_id, request.receiver_id]))
                .order(stocks::store_id)
                .select(StockRow::as_select())
                .for_update()
                .load(conn)?;
            let available = locked
                .iter()
                .find(|row| row.store_id == request.sender_id)
                .map(|row| row.quantity)
                .ok_or(DomainError::NotFound("Stock"))?;
            if request.quantity > available {
                return Err(DomainError::InsufficientStock {
                    requested: request.quantity,
                    available,
                });
            }

            let sender = diesel::update(
                stocks::table.find((request.sender_id, request.product_id)),
            )
            .set(stocks::quantity.eq(stocks::quantity - request.quantity))
            .returning(StockRow::as_returning())
            .get_result(conn)?;
            let receiver = diesel::insert_into(stocks::table)
                .values(&StockRow {
                    store_id: request.receiver_id,
                    product_id: request.product_id,
                    quantity: request.quantity,
                })
                .on_conflict((stocks::store_id, stocks::product_id))
                .do_update()
                .set(stocks::quantity.eq(stocks::quantity + request.quantity))
                .returning(StockRow::as_returning())
                .get_result(conn)?;

            Ok(TransferReceipt {
                sender: sender.into(),
                receiver: receiver.into(),
            })
        })
    }
}
