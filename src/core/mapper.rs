use crate::domain::item_price::ItemPriceRecord;
use crate::domain::model::{ColumnLayout, SourceRow};
use crate::domain::pricing::decode_regional_prices;
use crate::utils::error::{EtlError, Result};

/// Turns one sheet row into a validated [`ItemPriceRecord`].
#[derive(Debug, Clone)]
pub struct RowMapper {
    layout: ColumnLayout,
    require_sku: bool,
}

impl RowMapper {
    pub fn new(layout: ColumnLayout) -> Self {
        Self {
            layout,
            require_sku: true,
        }
    }

    /// With `false`, a blank SKU cell passes through as an empty string.
    pub fn with_require_sku(mut self, require_sku: bool) -> Self {
        self.require_sku = require_sku;
        self
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// SKU as literal cell text, untrimmed.
    pub fn sku(&self, row: &SourceRow) -> String {
        row.cell(self.layout.sku).to_text()
    }

    /// Errors are tagged with the row number.
    pub fn map_row(&self, row: &SourceRow) -> Result<ItemPriceRecord> {
        self.map_cells(row).map_err(|e| e.at_row(row.row_number))
    }

    fn map_cells(&self, row: &SourceRow) -> Result<ItemPriceRecord> {
        let sku = self.sku(row);
        if self.require_sku && sku.trim().is_empty() {
            return Err(EtlError::MissingSku);
        }

        let payload = row.cell(self.layout.payload).to_text();
        let prices = decode_regional_prices(&payload, &sku)?;

        tracing::debug!(row = row.row_number, sku = %sku, "Decoded regional prices");
        ItemPriceRecord::new(sku, prices)
    }
}

impl Default for RowMapper {
    fn default() -> Self {
        Self::new(ColumnLayout::default())
    }
}
