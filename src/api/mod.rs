pub mod department;
pub mod leave_request;
pub mod person;

use crate::leave::service::LeaveService;
use crate::store::mysql::MySqlStore;

/// Service type shared with every handler through `web::Data`.
pub type AppService = LeaveService<MySqlStore>;
