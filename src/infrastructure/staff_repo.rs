use std::collections::HashMap;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::page::{ListQuery, Page};
use crate::domain::party::{Staff, StaffInput, StaffReportLine, StaffView};
use crate::domain::patch::PatchSet;
use crate::domain::ports::StaffRepository;
use crate::schema::{categories, order_items, orders, products, staffs, stores};

use super::models::{StaffChanges, StaffRow, StoreRow};
use super::patch::execute_patch;

#[derive(Clone)]
pub struct DieselStaffRepository {
    pool: DbPool,
}

impl DieselStaffRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn filtered(query: &ListQuery) -> staffs::BoxedQuery<'static, Pg> {
        let mut q = staffs::table.into_boxed();
        if let Some(pattern) = query.search_pattern() {
            q = q.filter(
                staffs::first_name
                    .ilike(pattern.clone())
                    .or(staffs::last_name.ilike(pattern)),
            );
        }
        q
    }
}

fn changes(input: &StaffInput) -> StaffChanges<'_> {
    StaffChanges {
        first_name: input.first_name.trim(),
        last_name: input.last_name.trim(),
        email: input.email.trim(),
        phone: input.phone.as_deref(),
        active: input.active,
        store_id: input.store_id,
        manager_id: input.manager_id,
    }
}

/// Attaches store and manager data to each staff row. Managers are loaded in
/// one extra query.
fn into_views(
    conn: &mut PgConnection,
    rows: Vec<(StaffRow, StoreRow)>,
) -> QueryResult<Vec<StaffView>> {
    let manager_ids: Vec<i32> = rows.iter().filter_map(|(s, _)| s.manager_id).collect();
    let managers: HashMap<i32, Staff> = if manager_ids.is_empty() {
        HashMap::new()
    } else {
        staffs::table
            .filter(staffs::staff_id.eq_any(manager_ids))
            .select(StaffRow::as_select())
            .load(conn)?
            .into_iter()
            .map(|m| (m.staff_id, Staff::from(m)))
            .collect()
    };

    Ok(rows
        .into_iter()
        .map(|(staff, store)| StaffView {
            manager_data: staff.manager_id.and_then(|id| managers.get(&id).cloned()),
            staff: staff.into(),
            store_data: store.into(),
        })
        .collect())
}

type ReportRow = (String, String, String, String, i32, BigDecimal, NaiveDate);

fn report_line(
    (first_name, last_name, category, product, quantity, list_price, order_date): ReportRow,
) -> StaffReportLine {
    let line_total =
        (list_price * BigDecimal::from(quantity)).with_scale_round(2, RoundingMode::HalfUp);
    StaffReportLine {
        full_name: format!("{first_name} {last_name}"),
        category,
        product,
        quantity,
        line_total,
        order_date,
    }
}

impl StaffRepository for DieselStaffRepository {
    fn create(&self, input: &StaffInput) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;
        let id = diesel::insert_into(staffs::table)
            .values(&changes(input))
            .returning(staffs::staff_id)
            .get_result(&mut conn)?;
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<StaffView>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = staffs::table
            .inner_join(stores::table)
            .filter(staffs::staff_id.eq(id))
            .select((StaffRow::as_select(), StoreRow::as_select()))
            .first::<(StaffRow, StoreRow)>(&mut conn)
            .optional()?;
        match row {
            Some(row) => Ok(into_views(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn list(&self, query: &ListQuery) -> Result<Page<StaffView>, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let count: i64 = Self::filtered(query).count().get_result(conn)?;
            let ids: Vec<i32> = Self::filtered(query)
                .select(staffs::staff_id)
                .order(staffs::staff_id)
                .offset(query.offset)
                .limit(query.limit)
                .load(conn)?;
            let rows = staffs::table
                .inner_join(stores::table)
                .filter(staffs::staff_id.eq_any(ids))
                .order(staffs::staff_id)
                .select((StaffRow::as_select(), StoreRow::as_select()))
                .load::<(StaffRow, StoreRow)>(conn)?;
            Ok(Page {
                count,
                items: into_views(conn, rows)?,
            })
        })
    }

    fn report(&self, query: &ListQuery) -> Result<Page<StaffReportLine>, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let mut count_query = staffs::table
                .inner_join(
                    orders::table.inner_join(
                        order_items::table
                            .inner_join(products::table.inner_join(categories::table)),
                    ),
                )
                .into_boxed();
            let mut page_query = staffs::table
                .inner_join(
                    orders::table.inner_join(
                        order_items::table
                            .inner_join(products::table.inner_join(categories::table)),
                    ),
                )
                .select((
                    staffs::first_name,
                    staffs::last_name,
                    categories::category_name,
                    products::product_name,
                    order_items::quantity,
                    order_items::list_price,
                    orders::order_date,
                ))
                .into_boxed();
            if let Some(pattern) = query.search_pattern() {
                count_query = count_query.filter(
                    staffs::first_name
                        .ilike(pattern.clone())
                        .or(staffs::last_name.ilike(pattern.clone())),
                );
                page_query = page_query.filter(
                    staffs::first_name
                        .ilike(pattern.clone())
                        .or(staffs::last_name.ilike(pattern)),
                );
            }

            let count: i64 = count_query.count().get_result(conn)?;
            let rows = page_query
                .order((
                    staffs::staff_id,
                    orders::order_id,
                    order_items::item_id,
                ))
                .offset(query.offset)
                .limit(query.limit)
                .load::<ReportRow>(conn)?;
            Ok(Page {
                count,
                items: rows.into_iter().map(report_line).collect(),
            })
        })
    }

    fn update(&self, id: i32, input: &StaffInput) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = diesel::update(staffs::table.find(id))
            .set(&changes(input))
            .execute(&mut conn)?;
        Ok(rows)
    }

    fn patch(&self, patch: &PatchSet) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(execute_patch(&mut conn, patch)?)
    }

    fn delete(&self, id: i32) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(staffs::table.find(id)).execute(&mut conn)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::NewOrderItem;
    use crate::domain::ports::{OrderRepository, StockRepository};
    use crate::domain::stock::StockInput;
    use crate::infrastructure::order_repo::DieselOrderRepository;
    use crate::infrastructure::stock_repo::DieselStockRepository;
    use crate::infrastructure::test_support::{create_order, dec, seed, setup_db};

    #[test]
    fn report_line_multiplies_and_rounds() {
        let line = report_line((
            "Mireya".to_string(),
            "Copeland".to_string(),
            "Road Bikes".to_string(),
            "Surly Straggler".to_string(),
            3,
            dec("1549.995"),
            NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        ));
        assert_eq!(line.full_name, "Mireya Copeland");
        assert_eq!(line.line_total, dec("4649.99"));
    }

    #[tokio::test]
    async fn view_includes_store_and_manager() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        let repo = DieselStaffRepository::new(pool);
        let id = repo
            .create(&StaffInput {
                first_name: "Mireya".to_string(),
                last_name: "Copeland".to_string(),
                email: "mireya.copeland@bikes.shop".to_string(),
                phone: None,
                active: true,
                store_id: fixture.store_a,
                manager_id: Some(fixture.staff_id),
            })
            .expect("create staff");

        let view = repo.find_by_id(id).expect("find").expect("exists");
        assert_eq!(view.store_data.store_id, fixture.store_a);
        assert_eq!(
            view.manager_data.map(|m| m.first_name),
            Some("Fabiola".to_string())
        );

        let page = repo.list(&ListQuery::default()).expect("list");
        assert_eq!(page.count, 2);
        assert!(page.items[0].manager_data.is_none());
        assert!(page.items[1].manager_data.is_some());
    }

    #[tokio::test]
    async fn report_emits_one_line_per_item() {
        let (_container, pool) = setup_db().await;
        let fixture = seed(&pool);
        DieselStockRepository::new(pool.clone())
            .create(&StockInput {
                store_id: fixture.store_a,
                product_id: fixture.product_id,
                quantity: 10,
            })
            .expect("create stock");
        let order_id = create_order(&pool, &fixture, fixture.store_a);
        let orders = DieselOrderRepository::new(pool.clone());
        for quantity in [1, 2] {
            orders
                .add_item(
                    order_id,
                    &NewOrderItem {
                        product_id: fixture.product_id,
                        quantity,
                        list_price: dec("379.99"),
                        discount: dec("0"),
                    },
                )
                .expect("add item");
        }

        let repo = DieselStaffRepository::new(pool);
        let page = repo.report(&ListQuery::default()).expect("report");
        assert_eq!(page.count, 2);
        assert_eq!(page.items[0].full_name, "Fabiola Jackson");
        assert_eq!(page.items[0].category, "Mountain Bikes");
        assert_eq!(page.items[1].line_total, dec("759.98"));

        let filtered = repo
            .report(&ListQuery::new(None, None, Some("nobody".to_string())))
            .expect("report");
        assert_eq!(filtered.count, 0);
        assert!(filtered.items.is_empty());
    }
}
