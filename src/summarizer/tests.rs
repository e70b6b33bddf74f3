#![expect(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

mod views;

use super::Record;

fn record(gender: Option<&str>, age: Option<i64>) -> Record {
    Record {
        gender: gender.map(str::to_owned),
        age,
        ..Record::default()
    }
}
