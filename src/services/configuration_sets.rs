//! Configuration sets.

use crate::operations::*;

service! {
    /// Manages configuration sets.
    ConfigurationSetService
}

impl ConfigurationSetService {
    service_operations! {
        /// Create a configuration set.
        create_configuration_set(CreateConfigurationSetRequest);
        /// Delete a configuration set.
        delete_configuration_set(DeleteConfigurationSetRequest);
        /// Read a configuration set.
        describe_configuration_set(DescribeConfigurationSetRequest);
        /// List configuration sets.
        list_configuration_sets(ListConfigurationSetsRequest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::answering;

    #[tokio::test]
    async fn test_list_configuration_sets() {
        let service = ConfigurationSetService::new(answering(
            "ListConfigurationSets",
            "<ConfigurationSets><member><Name>tracking</Name></member></ConfigurationSets>",
        ));
        let result = service
            .list_configuration_sets(ListConfigurationSetsRequest::new())
            .await
            .unwrap();
        assert_eq!(result.configuration_sets[0].name, "tracking");
    }
}
