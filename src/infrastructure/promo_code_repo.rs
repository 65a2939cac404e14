use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::page::{escape_like, ListQuery, Page};
use crate::domain::ports::PromoCodeRepository;
use crate::domain::promo_code::{PromoCode, PromoCodeInput};
use crate::schema::promo_codes;

use super::models::{PromoCodeChanges, PromoCodeRow};

#[derive(Clone)]
pub struct DieselPromoCodeRepository {
    pool: DbPool,
}

impl DieselPromoCodeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn filtered(query: &ListQuery) -> promo_codes::BoxedQuery<'static, Pg> {
        let mut q = promo_codes::table.into_boxed();
        if let Some(pattern) = query.search_pattern() {
            q = q.filter(promo_codes::code_name.ilike(pattern));
        }
        q
    }
}

fn changes(input: &PromoCodeInput) -> PromoCodeChanges<'_> {
    PromoCodeChanges {
        code_name: input.code_name.trim(),
        discount: &input.discount,
        discount_type: input.canonical_type(),
        order_limit_price: &input.order_limit_price,
    }
}

impl PromoCodeRepository for DieselPromoCodeRepository {
    fn create(&self, input: &PromoCodeInput) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;
        let id = diesel::insert_into(promo_codes::table)
            .values(&changes(input))
            .returning(promo_codes::code_id)
            .get_result(&mut conn)?;
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<PromoCode>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = promo_codes::table
            .find(id)
            .select(PromoCodeRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(PromoCode::from))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<PromoCode>, DomainError> {
        let mut conn = self.pool.get()?;
        // An ILIKE without wildcards is a case-insensitive equality.
        let row = promo_codes::table
            .filter(promo_codes::code_name.ilike(escape_like(name.trim())))
            .select(PromoCodeRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(PromoCode::from))
    }

    fn list(&self, query: &ListQuery) -> Result<Page<PromoCode>, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let count: i64 = Self::filtered(query).count().get_result(conn)?;
            let rows = Self::filtered(query)
                .select(PromoCodeRow::as_select())
                .order(promo_codes::code_id)
                .offset(query.offset)
                .limit(query.limit)
                .load(conn)?;
            Ok(Page {
                count,
                items: rows.into_iter().map(PromoCode::from).collect(),
            })
        })
    }

    fn update(&self, id: i32, input: &PromoCodeInput) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = diesel::update(promo_codes::table.find(id))
            .set(&changes(input))
            .execute(&mut conn)?;
        Ok(rows)
    }

    fn delete(&self, id: i32) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(promo_codes::table.find(id)).execute(&mut conn)?)
    }
}
