//! The paginate-and-materialize engine behind every entity call.

use crate::api::CommerceApi;
use crate::config::ExtractOptions;
use crate::error::{ExtractError, Result};
use crate::extract::RowMaterializer;
use crate::paginate::{capacity_hint, for_each_page, PageRequest, PageWindow};
use crate::schema::EntityKind;
use crate::table::Table;
use serde_json::Value;
use tracing::{debug, info};

/// Extracts entity tables through a [`CommerceApi`].
///
/// Every call validates its options, logs in afresh, then walks the pages in
/// offset order. The first failing request aborts the call; nothing fetched
/// before the failure is returned.
pub struct Extractor<A: CommerceApi> {
    api: A,
}

impl<A: CommerceApi> Extractor<A> {
    pub fn new(api: A) -> Self {
        Extractor { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn products(&self, options: &ExtractOptions) -> Result<Table> {
        self.extract(EntityKind::Product, options)
    }

    pub fn customers(&self, options: &ExtractOptions) -> Result<Table> {
        self.extract(EntityKind::Customer, options)
    }

    /// One row per line item; `nr_items` counts orders, not rows.
    pub fn orders(&self, options: &ExtractOptions) -> Result<Table> {
        self.extract(EntityKind::Order, options)
    }

    pub fn categories(&self, options: &ExtractOptions) -> Result<Table> {
        self.extract(EntityKind::Category, options)
    }

    pub fn extract(&self, kind: EntityKind, options: &ExtractOptions) -> Result<Table> {
        let window = PageWindow::new(options.nr_items, options.chunk_size, options.offset)?;

        let schema = kind.schema(&options.languages, &options.currencies);
        let materializer = RowMaterializer::new(&schema);
        let mut table = materializer.empty_table(capacity_hint(&window));

        let token = self.api.login()?;

        let mut remaining = window.total();
        for_each_page(&window, |request| {
            if options.verbose {
                info!(
                    entity = %kind,
                    offset = request.offset,
                    chunk_size = window.chunk_size(),
                    remaining,
                    "loading chunk"
                );
            } else {
                debug!(entity = %kind, offset = request.offset, limit = request.limit, "loading chunk");
            }

            let body = self.api.query(&token, &endpoint(kind, request, options))?;
            let records = page_results(&body, request)?;
            materializer.materialize_into(records, &mut table);

            remaining -= request.limit;
            Ok(())
        })?;

        debug!(entity = %kind, rows = table.len(), "extraction finished");
        Ok(table)
    }
}

/// Relative endpoint, with query string, for one page of `kind`.
pub fn endpoint(kind: EntityKind, request: PageRequest, options: &ExtractOptions) -> String {
    match kind {
        EntityKind::Product => format!(
            "{}?limit={}&offset={}&staged={}",
            kind.resource(),
            request.limit,
            request.offset,
            options.staged
        ),
        _ => format!(
            "{}?limit={}&offset={}",
            kind.resource(),
            request.limit,
            request.offset
        ),
    }
}

/// The page's records, truncated to the requested limit.
fn page_results(body: &Value, request: PageRequest) -> Result<&[Value]> {
    let results = body
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| ExtractError::MalformedResponse("page has no results array".to_string()))?;

    let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);
    Ok(&results[..results.len().min(limit)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AuthToken;
    use crate::config::Staged;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    /// Serves `total` generated records per entity and records every call.
    struct FakeApi {
        total: u64,
        logins: Cell<usize>,
        endpoints: RefCell<Vec<String>>,
        fail_at_offset: Option<u64>,
        line_items: usize,
    }

    impl FakeApi {
        fn new(total: u64) -> Self {
            FakeApi {
                total,
                logins: Cell::new(0),
                endpoints: RefCell::new(Vec::new()),
                fail_at_offset: None,
                line_items: 2,
            }
        }

        fn endpoints(&self) -> Vec<String> {
            self.endpoints.borrow().clone()
        }

        fn record(&self, resource: &str, i: u64) -> Value {
            match resource {
                "orders" => json!({
                    "id": format!("o{}", i),
                    "createdAt": "2017-01-01T00:00:00.000Z",
                    "totalPrice": {"currencyCode": "EUR", "centAmount": 100 * i},
                    "lineItems": (0..self.line_items)
                        .map(|j| json!({"productId": format!("p{}", j), "quantity": j + 1}))
                        .collect::<Vec<_>>()
                }),
                _ => json!({
                    "id": format!("{}{}", resource, i),
                    "createdAt": "2017-01-01T00:00:00.000Z",
                    "name": {"en": format!("item {}", i)}
                }),
            }
        }
    }

    fn query_param(endpoint: &str, name: &str) -> u64 {
        let query = endpoint.split('?').nth(1).unwrap();
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix(&format!("{}=", name)))
            .unwrap()
            .parse()
            .unwrap()
    }

    impl CommerceApi for FakeApi {
        fn login(&self) -> Result<AuthToken> {
            self.logins.set(self.logins.get() + 1);
            Ok(AuthToken::new("token"))
        }

        fn query(&self, token: &AuthToken, endpoint: &str) -> Result<Value> {
            assert_eq!(token.as_str(), "token");
            self.endpoints.borrow_mut().push(endpoint.to_string());

            let offset = query_param(endpoint, "offset");
            let limit = query_param(endpoint, "limit");
            if self.fail_at_offset == Some(offset) {
                return Err(ExtractError::Api { status: 500, body: "boom".to_string() });
            }

            let resource = endpoint.split('?').next().unwrap();
            let end = (offset + limit).min(self.total);
            let results: Vec<Value> = (offset..end).map(|i| self.record(resource, i)).collect();
            Ok(json!({"limit": limit, "offset": offset, "count": results.len(), "results": results}))
        }
    }

    #[test]
    fn test_products_single_page() {
        let api = FakeApi::new(1000);
        let table = Extractor::new(&api).products(&ExtractOptions::new(3)).unwrap();

        assert_eq!(api.endpoints(), vec!["product-projections?limit=3&offset=0&staged=false"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.entity, "products");
        let ids: Vec<&Value> = table.column("id").unwrap();
        assert_eq!(ids, vec![&json!("product-projections0"), &json!("product-projections1"), &json!("product-projections2")]);
    }

    #[test]
    fn test_products_two_pages() {
        let api = FakeApi::new(1000);
        let options = ExtractOptions { nr_items: 300, chunk_size: 250, ..Default::default() };
        let table = Extractor::new(&api).products(&options).unwrap();

        assert_eq!(
            api.endpoints(),
            vec![
                "product-projections?limit=250&offset=0&staged=false",
                "product-projections?limit=50&offset=250&staged=false",
            ]
        );
        assert_eq!(table.len(), 300);
        assert_eq!(table.get(0, "id").unwrap(), "product-projections0");
        assert_eq!(table.get(250, "id").unwrap(), "product-projections250");
        assert_eq!(table.get(299, "name_en").unwrap(), "item 299");
        assert_eq!(table.get(299, "name_de").unwrap(), "");
    }

    #[test]
    fn test_offsets_and_staged() {
        let api = FakeApi::new(1000);
        let options = ExtractOptions {
            nr_items: 7,
            chunk_size: 3,
            offset: 5,
            staged: Staged::True,
            ..Default::default()
        };
        Extractor::new(&api).products(&options).unwrap();

        assert_eq!(
            api.endpoints(),
            vec![
                "product-projections?limit=3&offset=5&staged=true",
                "product-projections?limit=3&offset=8&staged=true",
                "product-projections?limit=1&offset=11&staged=true",
            ]
        );
    }

    #[test]
    fn test_invalid_nr_items_before_any_call() {
        let api = FakeApi::new(10);
        let extractor = Extractor::new(&api);

        for nr_items in [0, -1] {
            let options = ExtractOptions::new(nr_items);
            for kind in [EntityKind::Product, EntityKind::Customer, EntityKind::Order, EntityKind::Category] {
                let err = extractor.extract(kind, &options).unwrap_err();
                assert!(matches!(err, ExtractError::InvalidArgument(_)));
            }
        }

        assert_eq!(api.logins.get(), 0);
        assert!(api.endpoints().is_empty());
    }

    #[test]
    fn test_failing_page_aborts_call() {
        let mut api = FakeApi::new(1000);
        api.fail_at_offset = Some(2);
        let options = ExtractOptions { nr_items: 6, chunk_size: 2, ..Default::default() };

        for kind in [EntityKind::Product, EntityKind::Customer, EntityKind::Order, EntityKind::Category] {
            let err = Extractor::new(&api).extract(kind, &options).unwrap_err();
            assert!(matches!(err, ExtractError::Api { status: 500, .. }));
        }
        // two calls per kind: the good first page, then the failing one
        assert_eq!(api.endpoints().len(), 8);
    }

    #[test]
    fn test_each_call_logs_in() {
        let api = FakeApi::new(10);
        let extractor = Extractor::new(&api);
        extractor.customers(&ExtractOptions::new(2)).unwrap();
        extractor.categories(&ExtractOptions::new(2)).unwrap();
        assert_eq!(api.logins.get(), 2);
    }

    #[test]
    fn test_short_results_keep_requesting() {
        let api = FakeApi::new(4);
        let options = ExtractOptions { nr_items: 10, chunk_size: 3, ..Default::default() };
        let table = Extractor::new(&api).customers(&options).unwrap();

        assert_eq!(api.endpoints().len(), 4);
        assert_eq!(api.endpoints()[0], "customers?limit=3&offset=0");
        assert_eq!(table.len(), 4);
        assert_eq!(table.columns()[0], "id");
    }

    #[test]
    fn test_orders_count_line_items_as_rows() {
        let mut api = FakeApi::new(1000);
        api.line_items = 3;
        let options = ExtractOptions { nr_items: 4, chunk_size: 3, languages: vec!["en".to_string()], ..Default::default() };
        let table = Extractor::new(&api).orders(&options).unwrap();

        assert_eq!(api.endpoints(), vec!["orders?limit=3&offset=0", "orders?limit=1&offset=3"]);
        assert_eq!(table.len(), 12);
        assert_eq!(table.get(0, "orderId").unwrap(), "o0");
        assert_eq!(table.get(2, "orderId").unwrap(), "o0");
        assert_eq!(table.get(3, "orderId").unwrap(), "o1");
        assert_eq!(table.get(11, "productId").unwrap(), "p2");
        assert_eq!(table.get(11, "totalPrice").unwrap(), 300);
        assert_eq!(table.get(0, "customerId").unwrap(), "anonymous");
    }

    #[test]
    fn test_orders_without_line_items() {
        let mut api = FakeApi::new(1000);
        api.line_items = 0;
        let table = Extractor::new(&api).orders(&ExtractOptions::new(5)).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.columns()[0], "productId");
    }

    #[test]
    fn test_page_results() {
        let request = PageRequest { offset: 0, limit: 2 };

        let body = json!({"results": [1, 2, 3]});
        assert_eq!(page_results(&body, request).unwrap(), &[json!(1), json!(2)]);

        let err = page_results(&json!({"message": "x"}), request).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedResponse(_)));
    }

    #[test]
    fn test_endpoints() {
        let request = PageRequest { offset: 500, limit: 250 };
        let options = ExtractOptions::default();
        assert_eq!(endpoint(EntityKind::Category, request, &options), "categories?limit=250&offset=500");
        assert_eq!(
            endpoint(EntityKind::Product, request, &options),
            "product-projections?limit=250&offset=500&staged=false"
        );
    }
}
