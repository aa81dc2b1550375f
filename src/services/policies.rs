//! Sending authorization policies.

use crate::operations::*;

service! {
    /// Manages the policies that let other accounts send from an identity.
    PolicyService
}

impl PolicyService {
    service_operations! {
        /// Create or replace a policy.
        put_identity_policy(PutIdentityPolicyRequest);
        /// Remove a policy.
        delete_identity_policy(DeleteIdentityPolicyRequest);
        /// Fetch policy documents by name.
        get_identity_policies(GetIdentityPoliciesRequest);
        /// List policy names of an identity.
        list_identity_policies(ListIdentityPoliciesRequest);
    }
}
