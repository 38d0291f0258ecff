// Portal API paths, relative to the regional `/api/` root.

/// App server: global device list.
pub const APPSVR_APP: &str = "appsvr/app.do";

/// Product catalog: class id to product map.
pub const PIM_PRODUCT_IOT_MAP: &str = "pim/product/getProductIotMap";

/// Log service: cleaning history.
pub const LG_LOG: &str = "lg/log.do";

/// IoT device manager: generic device commands.
pub const IOT_DEVMANAGER: &str = "iot/devmanager.do";
