//! Nested Boundary
//!
//! This example wraps a unit of work in a transaction boundary.
//!
//! Key concepts:
//! - The enter hook opens one transaction per outermost call
//! - Nested calls share the open transaction instead of opening another
//! - The exit hook commits, or rolls back and recovers from the fault
//!
//! Run with: cargo run --example nested_boundary

use boundary::core::{Boundary, CannotEnter};
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
enum StoreError {
    #[error("row {0} is locked")]
    Locked(u32),

    #[error(transparent)]
    Boundary(#[from] CannotEnter),
}

fn save(tx: &Boundary<u32, StoreError>, row: u32) -> Result<(), StoreError> {
    tx.enter(|id| {
        println!("  [tx {id}] saving row {row}");
        if row == 13 {
            return Err(StoreError::Locked(row));
        }
        Ok(())
    })
}

fn main() {
    println!("=== Nested Boundary Example ===\n");

    let next_id = Rc::new(Cell::new(1));
    let tx: Boundary<u32, StoreError> = Boundary::builder()
        .on_enter(move || {
            let id = next_id.get();
            next_id.set(id + 1);
            println!("[tx {id}] begin");
            Ok(id)
        })
        .on_exit(|info| {
            let id = info.enter_result();
            if info.fault_occurred() {
                if let Some(fault) = info.retrieve_fault() {
                    println!("[tx {id}] rollback: {fault}");
                }
            } else {
                println!("[tx {id}] commit");
            }
            Ok(())
        })
        .build();

    let batch = tx.clone();
    tx.enter(|_| {
        for row in [1, 2, 3] {
            save(&batch, row)?;
        }
        Ok(())
    })
    .unwrap();

    println!();

    let batch = tx.clone();
    tx.enter(|_| {
        for row in [12, 13, 14] {
            save(&batch, row)?;
        }
        Ok(())
    })
    .unwrap();

    println!("\nInside boundary afterwards: {}", tx.in_boundary());
    println!("\n=== Example Complete ===");
}
