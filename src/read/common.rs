/// Arguments for read requests.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReadArgs {
    /// Whether to use a strongly consistent read.
    ///
    /// `None` leaves the service default, an eventually consistent read.
    pub consistent_read: Option<bool>,
    /// The name of the table to read from.
    pub table_name: String,
}

/// apply common read settings to a builder
#[macro_export]
macro_rules! apply_read_operation {
    ($builder:expr, $read_args:expr) => {
        $builder
            .set_consistent_read($read_args.consistent_read)
            .table_name($read_args.table_name)
    };
}
