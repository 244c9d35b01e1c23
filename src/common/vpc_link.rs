//! Private-network attachments for HTTP API integrations.
//!
//! The subnet and security-group sets are collectors: mutable through
//! `add_subnets` / `add_security_groups` until synthesis, at which point the
//! owning stack materializes them into the Cfn VpcLink record exactly once.

use tracing::debug;

use crate::construct::{Stack, StringValue, Token};
use crate::errors::{Error, Result};

/// Imported attributes of the virtual private cloud a link attaches to.
#[derive(Debug, Clone)]
pub struct Vpc {
    pub vpc_id: StringValue,
    /// Subnets used when the link props name none explicitly
    pub private_subnet_ids: Vec<StringValue>,
}

#[derive(Debug, Clone)]
pub struct VpcLinkProps {
    pub vpc: Vpc,
    /// Explicit subnet set; defaults to the vpc's private subnets
    pub subnets: Option<Vec<StringValue>>,
    pub security_groups: Vec<StringValue>,
    /// Defaults to the construct id
    pub vpc_link_name: Option<String>,
}

/// Deferred-materialization state owned by the stack.
#[derive(Debug)]
pub(crate) struct VpcLinkState {
    pub(crate) path: String,
    pub(crate) logical_id: String,
    pub(crate) name: String,
    pub(crate) subnet_ids: Vec<StringValue>,
    pub(crate) security_group_ids: Vec<StringValue>,
}

/// A private-network attachment enabling an HTTP API to reach resources
/// inside a VPC.
#[derive(Debug, Clone)]
pub struct VpcLink {
    index: usize,
    vpc_link_id: Token,
}

impl VpcLink {
    pub fn new(stack: &mut Stack, id: &str, props: VpcLinkProps) -> Result<Self> {
        let path = format!("{}/{}", stack.name(), id);
        Self::create(stack, path, id, props)
    }

    pub(crate) fn create(
        stack: &mut Stack,
        path: String,
        id: &str,
        props: VpcLinkProps,
    ) -> Result<Self> {
        let subnet_ids = props.subnets.unwrap_or(props.vpc.private_subnet_ids);
        if subnet_ids.is_empty() {
            return Err(Error::invalid_input_at(path, "vpc link requires a non-empty subnet set"));
        }
        stack.reserve_path(&path)?;
        let logical_id = stack.logical_id(&path);
        let vpc_link_id = Token::reference(logical_id.clone());
        debug!(construct_path = %path, logical_id = %logical_id, "registered vpc link");
        stack.vpc_links.push(VpcLinkState {
            path,
            logical_id,
            name: props.vpc_link_name.unwrap_or_else(|| id.to_string()),
            subnet_ids,
            security_group_ids: props.security_groups,
        });
        Ok(Self { index: stack.vpc_links.len() - 1, vpc_link_id })
    }

    /// Deferred vpc link id, used as an integration's `ConnectionId`.
    pub fn vpc_link_id(&self) -> Token {
        self.vpc_link_id.clone()
    }

    /// Grow the subnet set. Rejected once the stack is synthesized.
    pub fn add_subnets<I: IntoIterator<Item = StringValue>>(
        &self,
        stack: &mut Stack,
        subnet_ids: I,
    ) -> Result<()> {
        self.ensure_mutable(stack)?;
        stack.vpc_links[self.index].subnet_ids.extend(subnet_ids);
        Ok(())
    }

    /// Grow the security-group set. Rejected once the stack is synthesized.
    pub fn add_security_groups<I: IntoIterator<Item = StringValue>>(
        &self,
        stack: &mut Stack,
        security_group_ids: I,
    ) -> Result<()> {
        self.ensure_mutable(stack)?;
        stack.vpc_links[self.index].security_group_ids.extend(security_group_ids);
        Ok(())
    }

    fn ensure_mutable(&self, stack: &Stack) -> Result<()> {
        if stack.is_synthesized() {
            return Err(Error::invariant_at(
                stack.vpc_links[self.index].path.clone(),
                "vpc link sets are frozen once the stack is synthesized",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vpc() -> Vpc {
        Vpc {
            vpc_id: "vpc-123".into(),
            private_subnet_ids: vec!["subnet-a".into(), "subnet-b".into()],
        }
    }

    #[test]
    fn subnets_default_to_private_subnets() {
        let mut stack = Stack::new("Demo").unwrap();
        VpcLink::new(
            &mut stack,
            "Link",
            VpcLinkProps { vpc: vpc(), subnets: None, security_groups: vec![], vpc_link_name: None },
        )
        .unwrap();
        let template = stack.synth().unwrap();
        let links = template.of_type("AWS::ApiGatewayV2::VpcLink");
        assert_eq!(links.len(), 1);
        let props = &links[0].1["Properties"];
        assert_eq!(props["SubnetIds"], serde_json::json!(["subnet-a", "subnet-b"]));
        assert_eq!(props["Name"], "Link");
        assert!(props.get("SecurityGroupIds").is_none());
    }

    #[test]
    fn empty_subnet_set_is_rejected() {
        let mut stack = Stack::new("Demo").unwrap();
        let err = VpcLink::new(
            &mut stack,
            "Link",
            VpcLinkProps {
                vpc: Vpc { vpc_id: "vpc-123".into(), private_subnet_ids: vec![] },
                subnets: None,
                security_groups: vec![],
                vpc_link_name: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn sets_mutate_until_synthesis() {
        let mut stack = Stack::new("Demo").unwrap();
        let link = VpcLink::new(
            &mut stack,
            "Link",
            VpcLinkProps {
                vpc: vpc(),
                subnets: Some(vec!["subnet-x".into()]),
                security_groups: vec!["sg-1".into()],
                vpc_link_name: Some("backend-link".into()),
            },
        )
        .unwrap();
        link.add_subnets(&mut stack, ["subnet-y".into()]).unwrap();
        link.add_security_groups(&mut stack, ["sg-2".into()]).unwrap();

        let template = stack.synth().unwrap();
        let props = &template.of_type("AWS::ApiGatewayV2::VpcLink")[0].1["Properties"];
        assert_eq!(props["SubnetIds"], serde_json::json!(["subnet-x", "subnet-y"]));
        assert_eq!(props["SecurityGroupIds"], serde_json::json!(["sg-1", "sg-2"]));
        assert_eq!(props["Name"], "backend-link");

        let err = link.add_subnets(&mut stack, ["subnet-z".into()]).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation { .. }));
    }
}
