//! Deployment planning for the catalog tables (pure functions).

use super::config::{GsiConfig, TableConfig};

/// Observed state of an existing table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    pub gsis: Vec<GsiState>,
}

impl TableState {
    /// True when the table and all of its indexes are active.
    pub fn is_settled(&self) -> bool {
        self.status == TableStatus::Active && self.gsis.iter().all(|g| g.status == GsiStatus::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

#[derive(Debug, Clone)]
pub struct GsiState {
    pub name: String,
    pub status: GsiStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GsiStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned change for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TablePlan {
    /// Table doesn't exist and will be created with every index.
    Create { config: TableConfig },
    /// Table exists but is missing indexes.
    AddGsis {
        table_name: String,
        gsis_to_add: Vec<GsiConfig>,
    },
    /// Table exists but a previous change is still in progress.
    WaitForActive { table_name: String },
    /// Table matches the schema.
    NoChanges { table_name: String },
}

impl TablePlan {
    pub fn has_changes(&self) -> bool {
        !matches!(self, TablePlan::NoChanges { .. })
    }
}

/// Planned removal for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    DeleteTable { table_name: String },
    AlreadyGone { table_name: String },
}

impl DestroyPlan {
    pub fn has_changes(&self) -> bool {
        matches!(self, DestroyPlan::DeleteTable { .. })
    }
}

/// Calculates what is needed to bring one table to the desired schema.
///
/// Indexes that exist but are not in the schema are left alone.
pub fn calculate_table_plan(current: Option<&TableState>, desired: &TableConfig) -> TablePlan {
    let Some(state) = current else {
        return TablePlan::Create {
            config: desired.clone(),
        };
    };

    let gsis_to_add: Vec<GsiConfig> = desired
        .gsis
        .iter()
        .filter(|gsi| !state.gsis.iter().any(|g| g.name == gsi.name))
        .cloned()
        .collect();

    if !gsis_to_add.is_empty() {
        TablePlan::AddGsis {
            table_name: desired.table_name.clone(),
            gsis_to_add,
        }
    } else if !state.is_settled() {
        TablePlan::WaitForActive {
            table_name: desired.table_name.clone(),
        }
    } else {
        TablePlan::NoChanges {
            table_name: desired.table_name.clone(),
        }
    }
}

pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Renders a table plan as display lines prefixed with `+`, `~` or `=`.
pub fn format_table_plan(plan: &TablePlan) -> Vec<String> {
    match plan {
        TablePlan::Create { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!("  Partition key: {} (S)", config.partition_key.name),
            ];
            for gsi in &config.gsis {
                lines.push(format!("  + GSI: {}", describe_gsi(gsi)));
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        TablePlan::AddGsis {
            table_name,
            gsis_to_add,
        } => {
            let mut lines = vec![format!("~ Update table: {}", table_name)];
            for gsi in gsis_to_add {
                lines.push(format!("  + Add GSI: {}", describe_gsi(gsi)));
            }
            lines
        }
        TablePlan::WaitForActive { table_name } => {
            vec![format!("~ Table '{}' is still being updated", table_name)]
        }
        TablePlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

fn describe_gsi(gsi: &GsiConfig) -> String {
    match &gsi.sort_key {
        Some(sk) => format!("{} ({}, {})", gsi.name, gsi.partition_key.name, sk.name),
        None => format!("{} ({})", gsi.name, gsi.partition_key.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::{categories_table_config, products_table_config};

    fn active_state(gsi_names: &[&str]) -> TableState {
        TableState {
            status: TableStatus::Active,
            gsis: gsi_names
                .iter()
                .map(|name| GsiState {
                    name: name.to_string(),
                    status: GsiStatus::Active,
                })
                .collect(),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let config = categories_table_config();

        let plan = calculate_table_plan(None, &config);

        assert_eq!(plan, TablePlan::Create { config });
    }

    #[test]
    fn test_missing_gsis_are_added() {
        let config = categories_table_config();
        let state = active_state(&["isMainCategory-index"]);

        let plan = calculate_table_plan(Some(&state), &config);

        match plan {
            TablePlan::AddGsis {
                table_name,
                gsis_to_add,
            } => {
                assert_eq!(table_name, "categories");
                let names: Vec<&str> = gsis_to_add.iter().map(|g| g.name.as_str()).collect();
                assert_eq!(names, vec!["parentCategoryId-index", "id-name-index"]);
            }
            other => panic!("expected AddGsis, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_table_has_no_changes() {
        let state = active_state(&["categoryId-index", "legacy-index"]);

        let plan = calculate_table_plan(Some(&state), &products_table_config());

        assert!(!plan.has_changes());
    }

    #[test]
    fn test_updating_table_waits() {
        let mut state = active_state(&["categoryId-index"]);
        state.gsis[0].status = GsiStatus::Creating;

        let plan = calculate_table_plan(Some(&state), &products_table_config());

        assert_eq!(
            plan,
            TablePlan::WaitForActive {
                table_name: "products".to_string()
            }
        );
    }

    #[test]
    fn test_destroy_plan() {
        let state = active_state(&[]);

        assert!(calculate_destroy_plan(Some(&state), "products").has_changes());
        assert!(!calculate_destroy_plan(None, "products").has_changes());
    }

    #[test]
    fn test_format_create_plan_lists_indexes() {
        let plan = calculate_table_plan(None, &categories_table_config());

        let lines = format_table_plan(&plan);

        assert_eq!(lines[0], "+ Create table: categories");
        assert!(lines.contains(&"  + GSI: id-name-index (id, name)".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("  Billing: PAY_PER_REQUEST"));
    }
}
