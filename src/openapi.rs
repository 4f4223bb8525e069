use utoipa::OpenApi;

use crate::handlers::{catalog, exchange, invoices, orders, settings, tables, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    info(title = "Restaurant POS API", description = "Tables, orders, invoices, menu catalog and printing settings"),
    paths(
        tables::list_tables,
        tables::create_table,
        tables::update_table,
        tables::delete_table,
        orders::list_orders,
        orders::get_table_order,
        orders::add_items,
        orders::mark_sent,
        orders::complete_order,
        invoices::list_invoices,
        invoices::create_invoice,
        catalog::list_menu_items,
        catalog::create_menu_item,
        catalog::update_menu_item,
        catalog::delete_menu_item,
        catalog::list_categories,
        catalog::create_category,
        catalog::rename_category,
        catalog::delete_category,
        catalog::list_departments,
        catalog::create_department,
        catalog::rename_department,
        catalog::delete_department,
        settings::get_kot_config,
        settings::update_kot_config,
        settings::get_bill_config,
        settings::update_bill_config,
        settings::get_restaurant_settings,
        settings::update_restaurant_settings,
        settings::login,
        exchange::export_template,
        exchange::export_catalog,
        exchange::import_catalog,
    ),
    components(schemas(
        MessageResponse,
        tables::TableResponse,
        tables::CreateTableRequest,
        tables::UpdateTableRequest,
        orders::TableOrderResponse,
        orders::AddItemsRequest,
        invoices::InvoiceResponse,
        invoices::CreateInvoiceRequest,
        catalog::MenuItemResponse,
        catalog::CreateMenuItemRequest,
        catalog::UpdateMenuItemRequest,
        catalog::NamedEntityResponse,
        catalog::NameRequest,
        settings::KotConfigResponse,
        settings::KotConfigRequest,
        settings::BillConfigResponse,
        settings::BillConfigRequest,
        settings::RestaurantSettingsResponse,
        settings::RestaurantSettingsRequest,
        exchange::ImportUpload,
        exchange::ImportStatsResponse,
        exchange::ImportResponse,
    )),
    tags(
        (name = "tables", description = "Floor plan"),
        (name = "orders", description = "Open table orders"),
        (name = "invoices", description = "Issued bills"),
        (name = "catalog", description = "Menu items, categories and departments"),
        (name = "settings", description = "Printing configuration and restaurant profile"),
        (name = "exchange", description = "Spreadsheet import and export"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_the_merge_endpoint() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/orders/table/{table_id}"));
        assert!(doc.paths.paths.contains_key("/api/menu/import"));
    }
}
