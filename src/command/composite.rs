use tracing::debug;

use crate::ledger::Ledger;

use super::{Command, UndoError};

/// Ordered group of commands executed front to back and undone back to front.
///
/// Steps run independently of each other's outcome.
#[derive(Debug, Default)]
pub struct SequentialComposite {
    steps: Vec<Box<dyn Command>>,
}

impl SequentialComposite {
    pub fn new(steps: Vec<Box<dyn Command>>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Box<dyn Command>] {
        &self.steps
    }
}

impl FromIterator<Box<dyn Command>> for SequentialComposite {
    fn from_iter<I: IntoIterator<Item = Box<dyn Command>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Command for SequentialComposite {
    fn execute(&mut self, ledger: &mut Ledger) {
        for step in &mut self.steps {
            step.execute(ledger);
        }
    }

    /// Best-effort: a step that cannot be reversed does not stop the others.
    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), UndoError> {
        let failures: Vec<_> = self
            .steps
            .iter_mut()
            .rev()
            .filter_map(|step| step.undo(ledger).err())
            .collect();

        match UndoError::collect(failures) {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    /// True when every step succeeded.
    fn succeeded(&self) -> bool {
        self.steps.iter().all(|step| step.succeeded())
    }

    fn skip(&mut self) {
        for step in &mut self.steps {
            step.skip();
        }
    }
}

/// Composite whose steps only run while every previous step succeeded.
///
/// Once a step fails the remaining ones are skipped, so undo treats them as
/// never having happened.
#[derive(Debug, Default)]
pub struct DependentComposite {
    inner: SequentialComposite,
}

impl DependentComposite {
    pub fn new(steps: Vec<Box<dyn Command>>) -> Self {
        Self {
            inner: SequentialComposite::new(steps),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn steps(&self) -> &[Box<dyn Command>] {
        self.inner.steps()
    }
}

impl FromIterator<Box<dyn Command>> for DependentComposite {
    fn from_iter<I: IntoIterator<Item = Box<dyn Command>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Command for DependentComposite {
    fn execute(&mut self, ledger: &mut Ledger) {
        let mut ok = true;
        for (idx, step) in self.inner.steps.iter_mut().enumerate() {
            if ok {
                step.execute(ledger);
                ok = step.succeeded();
                if !ok {
                    debug!(step = idx, "step failed, skipping the rest");
                }
            } else {
                step.skip();
            }
        }
    }

    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), UndoError> {
        self.inner.undo(ledger)
    }

    fn succeeded(&self) -> bool {
        self.inner.succeeded()
    }

    fn skip(&mut self) {
        self.inner.skip()
    }
}
