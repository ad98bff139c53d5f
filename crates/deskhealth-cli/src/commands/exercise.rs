use clap::Subcommand;
use deskhealth_core::{
    CatalogStore, Category, Database, ExerciseCatalog, ExerciseUpdate, NewExercise,
};
use serde_json::json;

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// List every exercise in display order
    List {
        /// Only enabled exercises
        #[arg(long)]
        enabled: bool,
    },
    /// Show the exercise the rotation will offer next
    Next,
    /// Add a custom exercise
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "1 min")]
        duration: String,
        /// stretching, mobility, strength or eye-care
        #[arg(long, default_value = "stretching")]
        category: Category,
    },
    /// Edit a custom exercise
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Delete a custom exercise
    Remove { id: String },
    /// Enable or disable an exercise
    Toggle { id: String },
    /// Move the exercise at a list position one place up
    Up { index: usize },
    /// Move the exercise at a list position one place down
    Down { index: usize },
    /// Replace the display order; unlisted exercises follow in default order
    Reorder {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

pub fn run(action: ExerciseAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut catalog = db.load_catalog()?;

    match action {
        ExerciseAction::List { enabled } => {
            let rows: Vec<_> = catalog
                .all()
                .into_iter()
                .filter(|ex| !enabled || catalog.is_enabled(&ex.id))
                .map(|ex| {
                    let on = catalog.is_enabled(&ex.id);
                    json!({ "exercise": ex, "enabled": on })
                })
                .collect();
            super::print_json(&rows)?;
        }
        ExerciseAction::Next => {
            let last = db.load_last_exercise()?;
            match catalog.upcoming(last.as_deref()) {
                Some(ex) => super::print_json(&ex)?,
                None => println!("no enabled exercises"),
            }
        }
        ExerciseAction::Add {
            name,
            description,
            duration,
            category,
        } => {
            let ex = catalog.add(NewExercise {
                name,
                description: description.unwrap_or_default(),
                duration,
                category,
            })?;
            save(&db, &catalog)?;
            super::print_json(&ex)?;
        }
        ExerciseAction::Update {
            id,
            name,
            description,
            duration,
            category,
        } => {
            let ex = catalog.update(
                &id,
                ExerciseUpdate {
                    name,
                    description,
                    duration,
                    category,
                },
            )?;
            save(&db, &catalog)?;
            super::print_json(&ex)?;
        }
        ExerciseAction::Remove { id } => {
            let ex = catalog.delete(&id)?;
            save(&db, &catalog)?;
            println!("removed: {}", ex.name);
        }
        ExerciseAction::Toggle { id } => {
            let enabled = catalog.toggle_enabled(&id)?;
            save(&db, &catalog)?;
            println!("{id}: {}", if enabled { "enabled" } else { "disabled" });
        }
        ExerciseAction::Up { index } => {
            catalog.move_up(index)?;
            save(&db, &catalog)?;
            print_order(&catalog);
        }
        ExerciseAction::Down { index } => {
            catalog.move_down(index)?;
            save(&db, &catalog)?;
            print_order(&catalog);
        }
        ExerciseAction::Reorder { ids } => {
            catalog.reorder(ids);
            save(&db, &catalog)?;
            print_order(&catalog);
        }
    }
    Ok(())
}

fn save(db: &Database, catalog: &ExerciseCatalog) -> Result<(), Box<dyn std::error::Error>> {
    db.save_catalog(catalog)?;
    Ok(())
}

fn print_order(catalog: &ExerciseCatalog) {
    for (i, ex) in catalog.all().iter().enumerate() {
        println!("{i:>2}  {:<4} {}", ex.id, ex.name);
    }
}
