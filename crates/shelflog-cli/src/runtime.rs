// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use sha2::{Digest, Sha256};
use shelflog_app::{CredentialCheck, Item, ListOrder, WriteOp};
use shelflog_db::Store;

pub struct DbRuntime<'a> {
    store: &'a Store,
    order: ListOrder,
}

impl<'a> DbRuntime<'a> {
    pub fn new(store: &'a Store, order: ListOrder) -> Self {
        Self { store, order }
    }
}

impl shelflog_tui::AppRuntime for DbRuntime<'_> {
    fn load_items(&mut self) -> Result<Vec<Item>> {
        self.store.list_items(self.order)
    }

    fn load_custom_categories(&mut self) -> Result<Vec<String>> {
        self.store.custom_categories()
    }

    fn apply_write(&mut self, op: &WriteOp) -> Result<()> {
        match op {
            WriteOp::SaveCustomCategories(categories) => {
                self.store.put_custom_categories(categories)?;
            }
            WriteOp::CreateItem(record) => {
                self.store.create_item(record)?;
            }
            WriteOp::UpdateItem(item_id, record) => self.store.update_item(*item_id, record)?,
            WriteOp::CompleteItem {
                id,
                rating,
                comments,
            } => self.store.complete_item(*id, *rating, comments)?,
            WriteOp::DeleteItem(item_id) => self.store.delete_item(*item_id)?,
        }
        Ok(())
    }
}

/// Compares the SHA-256 of the typed password against a configured hex digest.
#[derive(Debug, Clone)]
pub struct Sha256Check {
    expected: String,
}

impl Sha256Check {
    pub fn new(expected_hex: &str) -> Self {
        Self {
            expected: expected_hex.to_ascii_lowercase(),
        }
    }
}

impl CredentialCheck for Sha256Check {
    fn verify(&self, secret: &str) -> bool {
        sha256_hex(secret.as_bytes()) == self.expected
    }
}

fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut output = String::with_capacity(64);
    for byte in digest {
        use std::fmt::Write as _;
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}
