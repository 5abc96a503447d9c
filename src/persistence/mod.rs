pub mod diagnostics;
pub mod fields;
pub mod files;
pub mod integrity;
pub mod parser;
pub mod sections;
pub mod serializer;
pub mod snapshot;
pub mod store;
pub mod tables;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use files::{atomic_write, find_local_data_dir, get_data_dir, init_local_data_dir, read_file, DATA_DIR_NAME};
pub use integrity::{check_content, IntegrityReport};
pub use parser::{decode, decode_with_diagnostics, is_recognizable};
pub use serializer::encode;
pub use snapshot::{list_snapshots, snapshot_path, take_daily_snapshot};
pub use store::{Store, StoreConfig, DEFAULT_BACKUP_DIR_NAME, DEFAULT_FILE_NAME};
