use flatdb::{SortDirection, StoreConfig, TableStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Flat-File Table Demo\n");

    let path = std::env::temp_dir().join("flatdb-demo.txt");
    let mut store = TableStore::with_config(StoreConfig::with_data_file(&path));

    // Create schema, "id" is the primary key
    store.create_schema(vec!["id".into(), "name".into(), "age".into()])?;
    println!("Created table (id, name, age)");

    println!("Inserting data...");
    for (id, name, age) in [
        ("1", "Alice", "30"),
        ("2", "Bob", "unknown"),
        ("3", "Charlie", "25"),
        ("4", "Alicia", "41"),
    ] {
        store.insert_row(vec![id.into(), name.into(), age.into()])?;
    }

    if let Err(e) = store.insert_row(vec!["1".into(), "Mallory".into(), "99".into()]) {
        println!("Rejected: {e}");
    }
    println!();

    store.sort_table(2, SortDirection::Asc)?;
    println!("{}\n", store.display_all()?);

    println!("Fuzzy search for 'alise' in column 1:");
    for result in store.fuzzy_search(1, "alise")? {
        if let Some(row) = store.row(result.row_index) {
            println!("  {} (distance {})", row.join(" "), result.distance);
        }
    }
    println!();

    println!("{}\n", store.analyze_column(2)?);

    store.save()?;
    let mut reloaded = TableStore::with_config(StoreConfig::with_data_file(&path));
    let summary = reloaded.load()?;
    println!(
        "Reloaded {} columns and {} rows from {}",
        summary.columns,
        summary.rows,
        path.display()
    );

    Ok(())
}
