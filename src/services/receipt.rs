//! Inbound mail handling.

use crate::operations::*;

service! {
    /// Manages IP filters, receipt rule sets and receipt rules.
    ReceiptService
}

impl ReceiptService {
    service_operations! {
        /// Create an IP address filter.
        create_receipt_filter(CreateReceiptFilterRequest);
        /// Delete an IP address filter.
        delete_receipt_filter(DeleteReceiptFilterRequest);
        /// List IP address filters.
        list_receipt_filters(ListReceiptFiltersRequest);
        /// Create an empty rule set.
        create_receipt_rule_set(CreateReceiptRuleSetRequest);
        /// Copy a rule set with all its rules.
        clone_receipt_rule_set(CloneReceiptRuleSetRequest);
        /// Delete an inactive rule set.
        delete_receipt_rule_set(DeleteReceiptRuleSetRequest);
        /// Read a rule set and its rules.
        describe_receipt_rule_set(DescribeReceiptRuleSetRequest);
        /// Read the active rule set.
        describe_active_receipt_rule_set(DescribeActiveReceiptRuleSetRequest);
        /// List rule sets.
        list_receipt_rule_sets(ListReceiptRuleSetsRequest);
        /// Reorder every rule of a rule set.
        reorder_receipt_rule_set(ReorderReceiptRuleSetRequest);
        /// Activate a rule set, or deactivate all.
        set_active_receipt_rule_set(SetActiveReceiptRuleSetRequest);
        /// Add a rule.
        create_receipt_rule(CreateReceiptRuleRequest);
        /// Remove a rule.
        delete_receipt_rule(DeleteReceiptRuleRequest);
        /// Read a rule.
        describe_receipt_rule(DescribeReceiptRuleRequest);
        /// Move a rule.
        set_receipt_rule_position(SetReceiptRulePositionRequest);
        /// Replace a rule.
        update_receipt_rule(UpdateReceiptRuleRequest);
    }
}
