use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{
    Brand, BrandInput, Category, CategoryInput, ProductInput, ProductView,
};
use crate::domain::errors::DomainError;
use crate::domain::page::{ListQuery, Page};
use crate::domain::ports::{BrandRepository, CategoryRepository, ProductRepository};
use crate::schema::{brands, categories, products};

use super::models::{
    BrandChanges, BrandRow, CategoryChanges, CategoryRow, ProductChanges, ProductRow,
};

// ── Brands ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselBrandRepository {
    pool: DbPool,
}

impl DieselBrandRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn filtered(query: &ListQuery) -> brands::BoxedQuery<'static, Pg> {
        let mut q = brands::table.into_boxed();
        if let Some(pattern) = query.search_pattern() {
            q = q.filter(brands::brand_name.ilike(pattern));
        }
        q
    }
}

impl BrandRepository for DieselBrandRepository {
    fn create(&self, input: &BrandInput) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;
        let id = diesel::insert_into(brands::table)
            .values(&BrandChanges {
                brand_name: input.brand_name.trim(),
            })
            .returning(brands::brand_id)
            .get_result(&mut conn)?;
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Brand>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = brands::table
            .find(id)
            .select(BrandRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Brand::from))
    }

    fn list(&self, query: &ListQuery) -> Result<Page<Brand>, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let count: i64 = Self::filtered(query).count().get_result(conn)?;
            let rows = Self::filtered(query)
                .select(BrandRow::as_select())
                .order(brands::brand_id)
                .offset(query.offset)
                .limit(query.limit)
                .load(conn)?;
            Ok(Page {
                count,
                items: rows.into_iter().map(Brand::from).collect(),
            })
        })
    }

    fn update(&self, id: i32, input: &BrandInput) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = diesel::update(brands::table.find(id))
            .set(&BrandChanges {
                brand_name: input.brand_name.trim(),
            })
            .execute(&mut conn)?;
        Ok(rows)
    }

    fn delete(&self, id: i32) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(brands::table.find(id)).execute(&mut conn)?)
    }
}

// ── Categories ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn filtered(query: &ListQuery) -> categories::BoxedQuery<'static, Pg> {
        let mut q = categories::table.into_boxed();
        if let Some(pattern) = query.search_pattern() {
            q = q.filter(categories::category_name.ilike(pattern));
        }
        q
    }
}

impl CategoryRepository for DieselCategoryRepository {
    fn create(&self, input: &CategoryInput) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;
        let id = diesel::insert_into(categories::table)
            .values(&CategoryChanges {
                category_name: input.category_name.trim(),
            })
            .returning(categories::category_id)
            .get_result(&mut conn)?;
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = categories::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Category::from))
    }

    fn list(&self, query: &ListQuery) -> Result<Page<Category>, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let count: i64 = Self::filtered(query).count().get_result(conn)?;
            let rows = Self::filtered(query)
                .select(CategoryRow::as_select())
                .order(categories::category_id)
                .offset(query.offset)
                .limit(query.limit)
                .load(conn)?;
            Ok(Page {
                count,
                items: rows.into_iter().map(Category::from).collect(),
            })
        })
    }

    fn update(&self, id: i32, input: &CategoryInput) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = diesel::update(categories::table.find(id))
            .set(&CategoryChanges {
                category_name: input.category_name.trim(),
            })
            .execute(&mut conn)?;
        Ok(rows)
    }

    fn delete(&self, id: i32) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(categories::table.find(id)).execute(&mut conn)?)
    }
}

// ── Products ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn product_changes(input: &ProductInput) -> ProductChanges<'_> {
    ProductChanges {
        product_name: input.product_name.trim(),
        brand_id: input.brand_id,
        category_id: input.category_id,
        model_year: input.model_year,
        list_price: &input.list_price,
    }
}

fn product_view((product, brand, category): (ProductRow, BrandRow, CategoryRow)) -> ProductView {
    ProductView {
        product: product.into(),
        brand_data: brand.into(),
        category_data: category.into(),
    }
}

impl ProductRepository for DieselProductRepository {
    fn create(&self, input: &ProductInput) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;
        let id = diesel::insert_into(products::table)
            .values(&product_changes(input))
            .returning(products::product_id)
            .get_result(&mut conn)?;
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = products::table
            .inner_join(brands::table)
            .inner_join(categories::table)
            .filter(products::product_id.eq(id))
            .select((
                ProductRow::as_select(),
                BrandRow::as_select(),
                CategoryRow::as_select(),
            ))
            .first::<(ProductRow, BrandRow, CategoryRow)>(&mut conn)
            .optional()?;
        Ok(row.map(product_view))
    }

    fn list(&self, query: &ListQuery) -> Result<Page<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let mut count_query = products::table.into_boxed();
            let mut page_query = products::table
                .inner_join(brands::table)
                .inner_join(categories::table)
                .select((
                    ProductRow::as_select(),
                    BrandRow::as_select(),
                    CategoryRow::as_select(),
                ))
                .into_boxed();
            if let Some(pattern) = query.search_pattern() {
                count_query = count_query.filter(products::product_name.ilike(pattern.clone()));
                page_query = page_query.filter(products::product_name.ilike(pattern));
            }

            let count: i64 = count_query.count().get_result(conn)?;
            let rows = page_query
                .order(products::product_id)
                .offset(query.offset)
                .limit(query.limit)
                .load::<(ProductRow, BrandRow, CategoryRow)>(conn)?;
            Ok(Page {
                count,
                items: rows.into_iter().map(product_view).collect(),
            })
        })
    }

    fn update(&self, id: i32, input: &ProductInput) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = diesel::update(products::table.find(id))
            .set(&product_changes(input))
            .execute(&mut conn)?;
        Ok(rows)
    }

    fn delete(&self, id: i32) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(products::table.find(id)).execute(&mut conn)?)
    }
}
