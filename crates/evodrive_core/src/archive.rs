use crate::error::Result;
use evodrive_data::GenerationSummary;

/// Sink for per-generation training artifacts.
///
/// Failures are reported back to the trainer, which logs them and keeps
/// training.
pub trait GenomeArchive {
    /// Stores the best parameter vector of a completed generation.
    fn archive_best(&mut self, _generation: u64, _parameters: &[f32]) -> Result<()> {
        Ok(())
    }

    /// Records the fitness statistics of a completed generation.
    fn record_summary(&mut self, _summary: &GenerationSummary) -> Result<()> {
        Ok(())
    }
}

/// Keeps everything in memory; used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryArchive {
    pub best: Vec<(u64, Vec<f32>)>,
    pub summaries: Vec<GenerationSummary>,
}

impl GenomeArchive for MemoryArchive {
    fn archive_best(&mut self, generation: u64, parameters: &[f32]) -> Result<()> {
        self.best.push((generation, parameters.to_vec()));
        Ok(())
    }

    fn record_summary(&mut self, summary: &GenerationSummary) -> Result<()> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}

/// Lets a caller keep a handle on an archive it hands to the trainer.
impl<T: GenomeArchive> GenomeArchive for std::rc::Rc<std::cell::RefCell<T>> {
    fn archive_best(&mut self, generation: u64, parameters: &[f32]) -> Result<()> {
        self.borrow_mut().archive_best(generation, parameters)
    }

    fn record_summary(&mut self, summary: &GenerationSummary) -> Result<()> {
        self.borrow_mut().record_summary(summary)
    }
}
