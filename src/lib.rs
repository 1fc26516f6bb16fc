#![deny(missing_docs)]
#![deny(warnings)]

//! # Fatwa API
//!
//! A serverless HTTP handler serving CRUD operations over fatwa records kept
//! in a single DynamoDB table.
//!
//! ## Overview
//!
//! A request flows through three layers:
//! - [`mod@router`] dispatches the gateway request by method and path
//!   parameter, validates bodies and shapes the response
//! - [`mod@repository`] maps typed operations onto table items
//! - [`mod@table`] is the store itself, DynamoDB in production
//!
//! The DynamoDB requests are built from typed descriptions instead of
//! hand-written expression strings:
//!
//! ```no_run
//! use aws_sdk_dynamodb::{Client, types};
//! use fatwa_api::{common, write};
//!
//! # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
//! let update_item = write::update_item::UpdateItem {
//!     key: common::key::Key::new("id", "1".to_string()),
//!     assignments: write::update_item::SetAssignments(vec![
//!         ("question".to_string(), types::AttributeValue::S("...".to_string())),
//!         ("lang".to_string(), types::AttributeValue::S("en".to_string())),
//!     ]),
//!     write_args: write::common::WriteArgs {
//!         condition: Some(common::condition::ConditionMap::exists("id")),
//!         return_values: Some(types::ReturnValue::AllNew),
//!         table_name: "Fatawa".to_string(),
//!     },
//! };
//! // "SET #question = :set0, #lang = :set1" guarded by "attribute_exists(#id)"
//! update_item.send(client).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Keys and condition expressions
//! - [`mod@read`] - GetItem and paged Scan
//! - [`mod@write`] - PutItem, UpdateItem and DeleteItem
//! - [`mod@config`] and [`mod@logging`] - process start-up

/// Keys and condition expressions shared by reads and writes.
pub mod common;

/// Environment configuration.
pub mod config;

/// Storage errors.
pub mod error;

/// Tracing subscriber set-up.
pub mod logging;

/// The fatwa record and request bodies.
pub mod model;

/// Read requests: single item and scan pages.
pub mod read;

/// Typed fatwa operations over a table.
pub mod repository;

/// Method and path dispatch for gateway requests.
pub mod router;

/// The table seam and its implementations.
pub mod table;

/// Write requests: put, conditional update and delete.
pub mod write;
