//! Binds the setting manager feature files to the step registry.

use crate::fixtures::{ManagerContext, manager_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/group_apply.feature",
    fixtures = [manager_context: ManagerContext]
);
scenarios!(
    "tests/features/read_and_reset.feature",
    fixtures = [manager_context: ManagerContext]
);
