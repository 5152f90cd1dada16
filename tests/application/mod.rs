mod feedback_composer_test;
mod scoring_service_test;
