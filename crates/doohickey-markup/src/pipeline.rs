// Ordered text-substitution pipelines.
//
// A `Pipeline` is a named list of steps applied strictly in insertion order.
// Each step sees the full output of the one before it.

use std::fmt;

use regex::{Captures, Regex};

type CaptureFn = Box<dyn Fn(&Captures<'_>) -> String + Send + Sync>;
type TextFn = Box<dyn Fn(&str) -> String + Send + Sync>;

enum Action {
    /// `Regex::replace_all` with a `$n` template.
    Replace { pattern: Regex, template: String },
    /// `Regex::replace_all` with a computed replacement.
    ReplaceWith { pattern: Regex, replace: CaptureFn },
    /// Whole-text rewrite that is not a single regex.
    Map(TextFn),
}

pub struct Step {
    name: String,
    action: Action,
}

impl Step {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, input: &str) -> String {
        match &self.action {
            Action::Replace { pattern, template } => {
                pattern.replace_all(input, template.as_str()).into_owned()
            }
            Action::ReplaceWith { pattern, replace } => pattern
                .replace_all(input, |caps: &Captures<'_>| replace(caps))
                .into_owned(),
            Action::Map(f) => f(input),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.action {
            Action::Replace { pattern, .. } | Action::ReplaceWith { pattern, .. } => {
                pattern.as_str()
            }
            Action::Map(_) => "<map>",
        };
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("pattern", &kind)
            .finish()
    }
}

#[derive(Debug)]
pub struct Pipeline {
    name: &'static str,
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Append a regex replacement using a `$1`-style template.
    pub fn replace(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
        template: &str,
    ) -> Result<&mut Self, regex::Error> {
        let pattern = Regex::new(pattern)?;
        self.steps.push(Step {
            name: name.into(),
            action: Action::Replace {
                pattern,
                template: template.to_string(),
            },
        });
        Ok(self)
    }

    /// Append a regex replacement computed from the captures.
    pub fn replace_with<F>(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
        replace: F,
    ) -> Result<&mut Self, regex::Error>
    where
        F: Fn(&Captures<'_>) -> String + Send + Sync + 'static,
    {
        let pattern = Regex::new(pattern)?;
        self.steps.push(Step {
            name: name.into(),
            action: Action::ReplaceWith {
                pattern,
                replace: Box::new(replace),
            },
        });
        Ok(self)
    }

    /// Append a whole-text rewrite.
    pub fn map<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.steps.push(Step {
            name: name.into(),
            action: Action::Map(Box::new(f)),
        });
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.name == name)
    }

    pub fn run(&self, input: &str) -> String {
        let mut text = input.to_string();
        for step in &self.steps {
            text = step.apply(&text);
            log::trace!("{}: {} -> {} bytes", self.name, step.name, text.len());
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_run_in_insertion_order() {
        let mut pipeline = Pipeline::new("order");
        pipeline
            .replace("a-to-b", "a", "b")
            .unwrap()
            .replace("b-to-c", "b", "c")
            .unwrap();
        assert_eq!(pipeline.run("a"), "c");

        let mut reversed = Pipeline::new("reversed");
        reversed
            .replace("b-to-c", "b", "c")
            .unwrap()
            .replace("a-to-b", "a", "b")
            .unwrap();
        assert_eq!(reversed.run("a"), "b");
    }

    #[test]
    fn templates_closures_and_maps() {
        let mut pipeline = Pipeline::new("mixed");
        pipeline
            .replace("swap", r"(\w+)=(\w+)", "$2=$1")
            .unwrap()
            .replace_with("shout", r"[a-z]+", |caps| caps[0].to_uppercase())
            .unwrap();
        pipeline.map("wrap", |text| format!("[{text}]"));
        assert_eq!(pipeline.run("key=value"), "[VALUE=KEY]");
        assert_eq!(pipeline.step_names(), ["swap", "shout", "wrap"]);
        assert_eq!(pipeline.position("shout"), Some(1));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let mut pipeline = Pipeline::new("bad");
        assert!(pipeline.replace("oops", "(unclosed", "").is_err());
        assert!(pipeline.steps().is_empty());
    }

    #[test]
    fn empty_pipeline_is_identity() {
        assert_eq!(Pipeline::new("noop").run("same"), "same");
    }
}
