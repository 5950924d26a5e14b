//! End-to-end behavior tests for stockroom-page
//!
//! Fixtures are parsed from the markup the inventory templates render.
//! Set `RUST_LOG=stockroom_page=trace` to see dispatch logs.

use stockroom_page::{
    Behavior, BinderConfig, FileEntry, NodeId, Page, ScriptedHost,
};

const INVENTORY_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>Inventory</title></head>
<body>
  <div class="alert alert-success show" id="savedAlert">Product saved.</div>
  <div class="alert alert-warning alert-permanent" id="lowStockAlert">Low stock on 2 products.</div>

  <span data-bs-toggle="tooltip" title="Units on hand" id="qtyHelp">?</span>
  <button data-bs-toggle="popover" data-bs-content="Reorder at 5" id="reorderInfo">Info</button>

  <input type="text" id="search" placeholder="Search products" data-search-table="productTable">
  <input type="text" id="staleSearch" data-search-table="archivedTable">

  <div class="card" id="card">
    <table id="productTable" class="table table-responsive">
      <thead>
        <tr>
          <th class="sortable" id="nameHeader">Name</th>
          <th class="sortable" id="qtyHeader">Quantity</th>
          <th>Actions</th>
        </tr>
      </thead>
      <tbody>
        <tr><td>Widget A</td><td>10</td><td><a href="/products/1/delete/" id="deleteA" data-confirm="Delete Widget A?">Delete</a></td></tr>
        <tr><td>Widget B</td><td>9</td><td><a href="/products/2/delete/" id="deleteB" data-confirm="Delete Widget B?">Delete</a></td></tr>
        <tr><td>Gadget C</td><td>100</td><td></td></tr>
      </tbody>
    </table>
  </div>

  <form class="needs-validation" id="productForm" method="post" novalidate>
    <input type="text" name="name" id="name" required>
    <input type="number" name="quantity" id="quantity" min="0" max="500">
    <input type="email" name="supplier_email" id="email">
    <input type="file" class="custom-file-input" id="photo">
    <label for="photo" id="photoLabel">Choose file</label>
    <button type="submit">Save</button>
  </form>

  <a href="#" class="btn print-button" id="printButton">Print</a>
</body>
</html>
"##;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn load_with(html: &str, host: ScriptedHost, config: BinderConfig) -> Page<ScriptedHost> {
    init_tracing();
    let document = stockroom_html::parse(html).expect("fixture parses");
    let mut page = Page::with_config(document, host, config);
    assert!(page.content_loaded());
    page
}

fn load(host: ScriptedHost) -> Page<ScriptedHost> {
    load_with(INVENTORY_PAGE, host, BinderConfig::default())
}

fn id(page: &Page<ScriptedHost>, id: &str) -> NodeId {
    page.document()
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("no element #{id}"))
}

fn body_rows(page: &Page<ScriptedHost>, table: &str) -> Vec<NodeId> {
    let table = id(page, table);
    let tree = page.tree();
    let body = tree.get_elements_by_tag_name(table, "tbody")[0];
    tree.element_children(body)
}

fn column(page: &Page<ScriptedHost>, table: &str, index: usize) -> Vec<String> {
    let tree = page.tree();
    body_rows(page, table)
        .into_iter()
        .map(|row| tree.text_content(tree.element_children(row)[index]).trim().to_string())
        .collect()
}

fn visible_names(page: &Page<ScriptedHost>) -> Vec<String> {
    let tree = page.tree();
    body_rows(page, "productTable")
        .into_iter()
        .filter(|&row| !tree.is_display_none(row))
        .map(|row| tree.text_content(tree.element_children(row)[0]))
        .collect()
}

// ---------------------------------------------------------------------
// Table filter
// ---------------------------------------------------------------------

#[test]
fn test_filter_shows_matching_rows() {
    let mut page = load(ScriptedHost::default());
    let search = id(&page, "search");

    page.type_text(search, "widget").unwrap();
    assert_eq!(visible_names(&page), ["Widget A", "Widget B"]);

    page.type_text(search, "  GADGET ").unwrap();
    assert_eq!(visible_names(&page), ["Gadget C"]);

    page.type_text(search, "").unwrap();
    assert_eq!(visible_names(&page).len(), 3);
}

#[test]
fn test_filter_never_hides_header() {
    let mut page = load(ScriptedHost::default());
    let search = id(&page, "search");
    let header_row = page.tree().parent(id(&page, "nameHeader")).unwrap();

    page.type_text(search, "no such product").unwrap();
    assert!(visible_names(&page).is_empty());
    assert!(!page.tree().is_display_none(header_row));
}

#[test]
fn test_filter_keeps_cells_apart_in_indented_markup() {
    let html = r#"<body>
<input type="text" id="q" data-search-table="bins">
<table id="bins">
  <thead>
    <tr>
      <th>Product</th>
      <th>Qty</th>
    </tr>
  </thead>
  <tbody>
    <tr id="row">
      <td>Widget</td>
      <td>10</td>
    </tr>
  </tbody>
</table>
</body>"#;
    let mut page = load_with(html, ScriptedHost::default(), BinderConfig::default());
    let q = id(&page, "q");
    let row = id(&page, "row");

    page.type_text(q, "t10").unwrap();
    assert!(page.tree().is_display_none(row));

    page.type_text(q, "widget").unwrap();
    assert!(!page.tree().is_display_none(row));

    page.type_text(q, "10").unwrap();
    assert!(!page.tree().is_display_none(row));
}

#[test]
fn test_missing_table_does_not_stop_other_behaviors() {
    let mut page = load(ScriptedHost::default());
    let stale = id(&page, "staleSearch");

    let event = page.type_text(stale, "widget").unwrap();
    assert!(!event.is_default_prevented());
    assert_eq!(visible_names(&page).len(), 3);

    let print = id(&page, "printButton");
    assert!(page.click(print).is_default_prevented());
    assert_eq!(page.host().print_requests(), 1);
}

// ---------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------

#[test]
fn test_sort_numeric_column_ascending_then_descending() {
    let mut page = load(ScriptedHost::default());
    let qty = id(&page, "qtyHeader");

    page.click(qty);
    assert_eq!(column(&page, "productTable", 1), ["9", "10", "100"]);
    assert!(page.tree().has_class(qty, "asc"));

    page.click(qty);
    assert_eq!(column(&page, "productTable", 1), ["100", "10", "9"]);
    assert!(!page.tree().has_class(qty, "asc"));
}

#[test]
fn test_sort_two_row_scenario() {
    let html = r#"
        <table id="stock">
          <thead><tr><th>Product</th><th class="sortable" id="qty">Qty</th></tr></thead>
          <tbody>
            <tr><td>Widget A</td><td>10</td></tr>
            <tr><td>Widget B</td><td>9</td></tr>
          </tbody>
        </table>
    "#;
    let mut page = load_with(html, ScriptedHost::default(), BinderConfig::default());
    let qty = id(&page, "qty");

    page.click(qty);
    assert_eq!(column(&page, "stock", 1), ["9", "10"]);
    page.click(qty);
    assert_eq!(column(&page, "stock", 1), ["10", "9"]);
}

#[test]
fn test_sort_toggle_is_per_header() {
    let mut page = load(ScriptedHost::default());
    let qty = id(&page, "qtyHeader");
    let name = id(&page, "nameHeader");

    page.click(qty);
    // Clicking the header's text bubbles to the header
    let label = page.tree().children(name).next().unwrap();
    page.click(label);
    assert_eq!(column(&page, "productTable", 0), ["Gadget C", "Widget A", "Widget B"]);
    assert!(page.tree().has_class(name, "asc"));
    assert!(page.tree().has_class(qty, "asc"));
}

// ---------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------

#[test]
fn test_clamp_into_range() {
    let mut page = load(ScriptedHost::default());
    let quantity = id(&page, "quantity");

    page.type_text(quantity, "-5").unwrap();
    assert_eq!(page.tree().value(quantity), "0");

    page.type_text(quantity, "900").unwrap();
    assert_eq!(page.tree().value(quantity), "500");

    page.type_text(quantity, "90").unwrap();
    assert_eq!(page.tree().value(quantity), "90");

    page.type_text(quantity, "").unwrap();
    assert_eq!(page.tree().value(quantity), "");
}

#[test]
fn test_clamp_matches_type_in_any_case() {
    let html = r#"<body><input type="Number" id="qty" min="0" max="50"></body>"#;
    let mut page = load_with(html, ScriptedHost::default(), BinderConfig::default());
    let qty = id(&page, "qty");

    page.type_text(qty, "-3").unwrap();
    assert_eq!(page.tree().value(qty), "0");
    page.type_text(qty, "75").unwrap();
    assert_eq!(page.tree().value(qty), "50");
}

// ---------------------------------------------------------------------
// Confirmation and printing
// ---------------------------------------------------------------------

#[test]
fn test_confirm_decline_prevents_navigation() {
    let mut host = ScriptedHost::accepting();
    host.enqueue_answer(false);
    let mut page = load(host);
    let delete_a = id(&page, "deleteA");
    let delete_b = id(&page, "deleteB");

    assert!(page.click(delete_a).is_default_prevented());
    assert!(!page.click(delete_b).is_default_prevented());
    assert_eq!(
        page.host().questions(),
        ["Delete Widget A?", "Delete Widget B?"]
    );
}

#[test]
fn test_print_button() {
    let mut page = load(ScriptedHost::default());
    let print = id(&page, "printButton");
    assert!(page.click(print).is_default_prevented());
    assert!(page.click(print).is_default_prevented());
    assert_eq!(page.host().print_requests(), 2);
}

// ---------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------

#[test]
fn test_validation_gate() {
    let mut page = load(ScriptedHost::default());
    let form = id(&page, "productForm");
    let name = id(&page, "name");
    let email = id(&page, "email");

    let event = page.submit(form);
    assert!(event.is_default_prevented());
    assert!(page.tree().has_class(form, "was-validated"));

    page.type_text(name, "Widget D").unwrap();
    page.type_text(email, "not-an-email").unwrap();
    assert!(page.submit(form).is_default_prevented());

    page.type_text(email, "orders@acme.example").unwrap();
    assert!(!page.submit(form).is_default_prevented());
}

#[test]
fn test_file_label_updates() {
    let mut page = load(ScriptedHost::default());
    let photo = id(&page, "photo");
    let label = id(&page, "photoLabel");

    page.choose_files(photo, Vec::new()).unwrap();
    assert_eq!(page.tree().text_content(label), "Choose file");

    page.choose_files(
        photo,
        vec![FileEntry::new("widget-d.png").with_mime_type("image/png")],
    )
    .unwrap();
    assert_eq!(page.tree().text_content(label), "widget-d.png");
}

// ---------------------------------------------------------------------
// Widgets, alerts, layout
// ---------------------------------------------------------------------

#[test]
fn test_tooltip_and_popover() {
    let mut page = load(ScriptedHost::default());
    let help = id(&page, "qtyHelp");
    let info = id(&page, "reorderInfo");

    assert_eq!(
        page.tree().get_attribute(help, "data-bs-original-title"),
        Some("Units on hand")
    );
    page.hover(help);
    assert!(page.tree().has_attribute(help, "aria-describedby"));
    page.unhover(help);
    assert!(!page.tree().has_attribute(help, "aria-describedby"));

    page.click(info);
    let popover = page.widgets().popover(info).unwrap();
    assert!(popover.is_shown());
    assert_eq!(popover.content, "Reorder at 5");
}

#[test]
fn test_alerts_dismissed_after_delay() {
    let mut page = load(ScriptedHost::default());
    let saved = id(&page, "savedAlert");
    let low_stock = id(&page, "lowStockAlert");

    page.advance_time(4999);
    assert!(page.tree().is_connected(saved));

    page.advance_time(1);
    assert!(!page.tree().is_connected(saved));
    assert!(page.tree().is_connected(low_stock));
    assert!(!page.timers().has_pending());
}

#[test]
fn test_alert_removed_early_is_skipped() {
    let mut page = load(ScriptedHost::default());
    let saved = id(&page, "savedAlert");
    page.document_mut().tree_mut().detach(saved);

    assert_eq!(page.advance_time(5000), 1);
    assert!(page.tree().is_connected(id(&page, "lowStockAlert")));
}

#[test]
fn test_alert_delay_from_config() {
    let config = BinderConfig::from_toml_str("alert_dismiss_delay_ms = 1000").unwrap();
    let mut page = load_with(INVENTORY_PAGE, ScriptedHost::default(), config);
    let saved = id(&page, "savedAlert");
    page.advance_time(1000);
    assert!(!page.tree().is_connected(saved));
}

#[test]
fn test_responsive_table_wrapped_once() {
    let mut page = load(ScriptedHost::default());
    let table = id(&page, "productTable");
    let card = id(&page, "card");

    let wrapper = page.tree().parent(table).unwrap();
    assert!(page.tree().has_class(wrapper, "table-wrapper"));
    assert_eq!(page.tree().parent(wrapper), Some(card));

    page.bind(Behavior::ResponsiveTables).unwrap();
    assert_eq!(page.tree().parent(table), Some(wrapper));
    let wrappers = page.document().query_selector_all(".table-wrapper").unwrap();
    assert_eq!(wrappers.len(), 1);
}

// ---------------------------------------------------------------------
// Binding lifecycle
// ---------------------------------------------------------------------

#[test]
fn test_rebinding_adds_no_listeners() {
    let mut page = load(ScriptedHost::default());
    let before = page.listeners().len();

    let bindings = page.bind_all();
    assert_eq!(bindings.len(), Behavior::ALL.len());
    assert!(bindings.iter().all(|b| b.is_inert()));
    assert_eq!(page.listeners().len(), before);
    assert!(!page.content_loaded());

    // One sort per click, not one per bind
    let qty = id(&page, "qtyHeader");
    page.click(qty);
    assert_eq!(column(&page, "productTable", 1), ["9", "10", "100"]);
}

#[test]
fn test_unbind_confirmation() {
    let mut page = load(ScriptedHost::declining());
    let delete_a = id(&page, "deleteA");

    assert_eq!(page.unbind(Behavior::Confirmation), 2);
    assert!(!page.click(delete_a).is_default_prevented());
    assert!(page.host().questions().is_empty());
}

#[test]
fn test_unbind_alerts_cancels_timer() {
    let mut page = load(ScriptedHost::default());
    let saved = id(&page, "savedAlert");

    page.unbind(Behavior::AlertDismiss);
    assert_eq!(page.advance_time(10_000), 0);
    assert!(page.tree().is_connected(saved));
}
