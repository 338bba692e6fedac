//! Purchase order editor: loads the data its form depends on
//!
//! The editor needs the vendor list, then the product list, then (when
//! editing) the order itself. Steps run one after another and the first
//! failure ends the chain.

use crate::core::error::EntityError;
use crate::core::{Backend, ConsoleResult, Session};
use crate::entities::{Product, PurchaseOrder, Vendor};
use crate::forms::{PurchaseOrderForm, RecordForm};
use uuid::Uuid;

/// Backends the editor reads from
#[derive(Clone, Copy)]
pub struct PurchaseOrderSources<'a> {
    pub vendors: &'a dyn Backend<Vendor>,
    pub products: &'a dyn Backend<Product>,
    pub orders: &'a dyn Backend<PurchaseOrder>,
}

/// Loaded state of the purchase order create/edit screen
#[derive(Debug, Clone)]
pub struct PurchaseOrderEditor {
    /// Id of the order being edited, `None` for a new order
    pub order_id: Option<Uuid>,
    pub vendors: Vec<Vendor>,
    pub products: Vec<Product>,
    pub form: PurchaseOrderForm,
}

impl PurchaseOrderEditor {
    /// Load vendors, products and the order `id`, in that order
    pub async fn load(
        sources: PurchaseOrderSources<'_>,
        session: &Session,
        id: &Uuid,
    ) -> ConsoleResult<Self> {
        let (vendors, products) = Self::load_options(&sources, session).await?;

        let order = sources
            .orders
            .get(session, id)
            .await
            .inspect_err(|err| tracing::warn!(id = %id, error = %err, "purchase order load failed"))?
            .ok_or_else(|| EntityError::NotFound {
                entity_type: "purchase_order".to_string(),
                id: *id,
            })?;

        tracing::info!(id = %id, lines = order.items.len(), "purchase order editor ready");
        Ok(Self {
            order_id: Some(order.id),
            vendors,
            products,
            form: PurchaseOrderForm::from_record(&order),
        })
    }

    /// Load vendors then products for a blank order
    pub async fn new_order(sources: PurchaseOrderSources<'_>, session: &Session) -> ConsoleResult<Self> {
        let (vendors, products) = Self::load_options(&sources, session).await?;
        Ok(Self {
            order_id: None,
            vendors,
            products,
            form: PurchaseOrderForm::new(),
        })
    }

    async fn load_options(
        sources: &PurchaseOrderSources<'_>,
        session: &Session,
    ) -> ConsoleResult<(Vec<Vendor>, Vec<Product>)> {
        let vendors = sources
            .vendors
            .list(session)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "vendor list load failed"))?;
        let products = sources
            .products
            .list(session)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "product list load failed"))?;

        tracing::debug!(
            vendors = vendors.len(),
            products = products.len(),
            "purchase order options loaded"
        );
        Ok((vendors, products))
    }

    /// Vendors offered in the vendor picker
    pub fn vendor_options(&self) -> impl Iterator<Item = &Vendor> {
        self.vendors.iter().filter(|v| v.active)
    }

    /// Products offered in the line pickers
    pub fn product_options(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.active)
    }

    /// Choose a vendor from the loaded list
    pub fn select_vendor(&mut self, vendor_id: &Uuid) -> ConsoleResult<()> {
        self.form.select_vendor(vendor_id, &self.vendors)
    }

    /// Fill line `index` from a loaded product
    pub fn select_product(&mut self, index: usize, product_id: &Uuid) -> ConsoleResult<()> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == *product_id)
            .ok_or_else(|| EntityError::NotFound {
                entity_type: "product".to_string(),
                id: *product_id,
            })?;
        self.form.set_product(index, product)
    }

    /// Validate the form and create or update the order
    pub async fn save(
        &self,
        orders: &dyn Backend<PurchaseOrder>,
        session: &Session,
    ) -> ConsoleResult<PurchaseOrder> {
        match self.order_id {
            Some(id) => {
                let existing = orders.get(session, &id).await?.ok_or_else(|| {
                    EntityError::NotFound {
                        entity_type: "purchase_order".to_string(),
                        id,
                    }
                })?;
                let record = self.form.to_updated_record(&existing)?;
                orders.update(session, &id, record).await
            }
            None => {
                let record = self.form.to_new_record()?;
                orders.create(session, record).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBackend;

    fn vendor(name: &str) -> Vendor {
        Vendor {
            name: name.to_string(),
            active: true,
            ..Vendor::blank()
        }
    }

    fn product(name: &str) -> Product {
        Product {
            name: name.to_string(),
            sku: name.to_uppercase(),
            price: 2.0,
            active: true,
            ..Product::blank()
        }
    }

    #[tokio::test]
    async fn test_new_order_loads_options() {
        let vendors = InMemoryBackend::with_records(vec![vendor("Acme"), vendor("Birch")]);
        let products = InMemoryBackend::with_records(vec![product("bolt")]);
        let orders = InMemoryBackend::<PurchaseOrder>::new();
        let sources = PurchaseOrderSources {
            vendors: &vendors,
            products: &products,
            orders: &orders,
        };

        let editor = PurchaseOrderEditor::new_order(sources, &Session::anonymous())
            .await
            .unwrap();
        assert_eq!(editor.vendors.len(), 2);
        assert_eq!(editor.product_options().count(), 1);
        assert_eq!(editor.form.items.len(), 1);
        assert!(editor.order_id.is_none());
    }

    #[tokio::test]
    async fn test_edit_save_round() {
        let acme = vendor("Acme");
        let bolt = product("bolt");
        let vendors = InMemoryBackend::with_records(vec![acme.clone()]);
        let products = InMemoryBackend::with_records(vec![bolt.clone()]);
        let orders = InMemoryBackend::<PurchaseOrder>::new();
        let session = Session::anonymous();
        let sources = PurchaseOrderSources {
            vendors: &vendors,
            products: &products,
            orders: &orders,
        };

        let mut editor = PurchaseOrderEditor::new_order(sources, &session).await.unwrap();
        editor.form.po_number = "PO-7".to_string();
        editor.select_vendor(&acme.id).unwrap();
        editor.select_product(0, &bolt.id).unwrap();
        let created = editor.save(&orders, &session).await.unwrap();

        let mut editor = PurchaseOrderEditor::load(sources, &session, &created.id).await.unwrap();
        assert_eq!(editor.form.po_number, "PO-7");
        editor.form.items[0].quantity = 3;
        let saved = editor.save(&orders, &session).await.unwrap();

        assert_eq!(saved.id, created.id);
        assert_eq!(orders.len(), 1);
        assert!((saved.total() - 6.0).abs() < 1e-9);
    }
}
