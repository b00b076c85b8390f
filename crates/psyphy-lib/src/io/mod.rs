pub mod csv;
pub mod cut;
pub mod e4;
pub mod eplus;
pub mod labels;

pub use self::csv::{read_signal_csv, write_columns, write_signal_csv};
pub use cut::{read_cut_channel, CUT_BVP_FS, CUT_EDA_FS};
pub use e4::{read_e4_acc, read_e4_channel, AccSeries};
pub use eplus::{read_eplus_sessions, EPlusRecording};
pub use labels::{read_artefact_labels, write_artefact_labels};
