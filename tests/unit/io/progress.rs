//! Tests for progress tracking across attempts and batches

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;
    use wavecollapse::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use wavecollapse::io::progress::ProgressManager;

    // Tests ProgressManager construction and a single file lifecycle
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_new() {
        let mut pm = ProgressManager::new();

        pm.initialize(1);
        assert_eq!(pm.file_count(), 1);
        pm.start_file(0, Path::new("sample.png"), 10);
        pm.update_attempt(0, 1, "contradiction");
        pm.update_attempt(0, 2, "succeeded");
        pm.complete_file(0, true, Duration::from_millis(100));
        pm.finish();
    }

    // Tests default trait implementation matches new
    // Verified by creating different initial states
    #[test]
    fn test_progress_manager_default() {
        let pm = ProgressManager::default();
        assert_eq!(pm.file_count(), 0);
        pm.finish();
    }

    // Tests individual bars for small batches
    // Verified by creating one less progress bar
    #[test]
    fn test_multiple_files_under_limit() {
        let mut pm = ProgressManager::new();
        let file_count = MAX_INDIVIDUAL_PROGRESS_BARS - 1;
        pm.initialize(file_count);

        for i in 0..file_count {
            pm.start_file(i, Path::new(&format!("file{i}.png")), 3);
            pm.update_attempt(i, 1, "contradiction");
            pm.complete_file(i, false, Duration::from_millis(10));
        }

        pm.finish();
    }

    // Tests batch progress bar with more files than bars
    // Verified by changing batch mode threshold
    #[test]
    fn test_multiple_files_over_limit() {
        let mut pm = ProgressManager::new();
        let file_count = MAX_INDIVIDUAL_PROGRESS_BARS + 5;
        pm.initialize(file_count);
        assert_eq!(pm.file_count(), file_count);

        for i in 0..file_count {
            pm.start_file(i, Path::new(&format!("file{i}.png")), 1);
            pm.update_attempt(i, 1, "succeeded");
            pm.complete_file(i, true, Duration::from_millis(10));
        }

        pm.finish();
    }

    // Tests out-of-order and out-of-bounds file indices
    // Verified by using unchecked indexing
    #[test]
    fn test_out_of_bounds_file_index() {
        let mut pm = ProgressManager::new();
        pm.initialize(3);

        pm.update_attempt(10, 1, "succeeded");
        pm.complete_file(10, true, Duration::from_secs(1));
        pm.start_file(5, Path::new("late.png"), 2);
        pm.complete_file(5, false, Duration::from_secs(1));
        pm.finish();
    }

    // Tests empty file list handling
    // Verified by adding panic for zero files
    #[test]
    fn test_empty_file_list() {
        let mut pm = ProgressManager::new();
        pm.initialize(0);
        pm.finish();
    }
}
