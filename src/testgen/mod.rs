//! Compose UI test source rendering
//!
//! Turns analyzed functions into the text of one Kotlin test class, through
//! an embedded MiniJinja template. Writing the file and formatting it are the
//! caller's business.
//!
//! ## Output Shape
//!
//! ```kotlin
//! @Suppress("IllegalIdentifier")
//! @RunWith(AndroidJUnit4::class)
//! class LoginScreenTest {
//!
//!     @get:Rule
//!     val composeTestRule = createComposeRule()
//!
//!     @Test
//!     fun `submit click is performed 1`() {
//!         composeTestRule.setContent {
//!             LoginScreen(
//!                 onSubmit = {}
//!             )
//!         }
//!         composeTestRule.onNodeWithTag("submit").performClick()
//!     }
//! }
//! ```

pub mod context;
pub mod filters;

use crate::analyze::FunctionTest;
use crate::error::Result;
use minijinja::Environment;
use std::sync::OnceLock;
use tracing::debug;

const COMPOSE_TEST: &str = include_str!("../../templates/compose_test.kt.jinja");
const COMPOSE_TEST_NAME: &str = "compose_test.kt.jinja";

/// Imports every generated test class needs
pub const FIXED_IMPORTS: &[&str] = &[
    "androidx.compose.ui.test.assert",
    "androidx.compose.ui.test.assertIsDisplayed",
    "androidx.compose.ui.test.hasText",
    "androidx.compose.ui.test.junit4.createComposeRule",
    "androidx.compose.ui.test.onNodeWithTag",
    "androidx.compose.ui.test.performClick",
    "androidx.compose.ui.test.performTextInput",
    "androidx.test.ext.junit.runners.AndroidJUnit4",
    "org.junit.Rule",
    "org.junit.Test",
    "org.junit.runner.RunWith",
];

static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();

fn init_engine() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    filters::register_filters(&mut env);
    env.add_template(COMPOSE_TEST_NAME, COMPOSE_TEST)
        .expect("Failed to load compose test template");
    env
}

/// Get the global template engine
pub fn engine() -> &'static Environment<'static> {
    ENGINE.get_or_init(init_engine)
}

/// Render one test class covering `tests`, named after the first function
pub fn render_test_file(tests: &[FunctionTest], package: &str) -> Result<String> {
    let ctx = context::TestFileContext::from_tests(tests, package);
    debug!(
        class = %ctx.class_name,
        cases = ctx.case_count(),
        "rendering compose test file"
    );
    let template = engine().get_template(COMPOSE_TEST_NAME)?;
    let mut out = template.render(&ctx)?;
    out.push('\n');
    Ok(out)
}
