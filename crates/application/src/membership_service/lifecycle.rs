use tracing::{info, warn};
use vulcan_core::{ActorId, AppError, AppResult, UserIdentity};
use vulcan_domain::{
    AuditAction, Membership, MembershipEvent, MembershipId, MembershipTarget, Operation, Role,
};

use crate::AuditEvent;

use super::{CreateMembershipInput, MembershipService, UpdateMembershipInput};

impl MembershipService {
    /// Grants a role on a project or component.
    ///
    /// The acting user needs a direct admin row on the target (or the
    /// global admin flag); admin inherited from a parent project is not
    /// sufficient for creation.
    pub async fn create(
        &self,
        actor: &UserIdentity,
        input: CreateMembershipInput,
    ) -> AppResult<Membership> {
        let target = parse_target(&input)?;

        self.authorization_service
            .require_direct_admin(actor, target)
            .await?;

        let (user_id, role) = self.validate_new_membership(&input, target).await?;
        let membership = self
            .memberships
            .create_membership(Membership::new(user_id, target, role))
            .await?;

        info!(
            membership_id = %membership.id(),
            membership_type = target.membership_type().as_str(),
            target_id = %target.id(),
            role = role.as_str(),
            "membership created"
        );

        self.append_audit(
            actor,
            AuditAction::MembershipCreated,
            &membership,
            format!(
                "granted '{}' to '{}' on {} '{}'",
                role,
                user_id,
                target.kind(),
                target.id()
            ),
        )
        .await;
        self.dispatch(MembershipEvent::Created, &membership, actor)
            .await;

        Ok(membership)
    }

    /// Changes the role of an existing membership.
    pub async fn update(
        &self,
        actor: &UserIdentity,
        membership_id: MembershipId,
        input: UpdateMembershipInput,
    ) -> AppResult<Membership> {
        let membership = self.load(membership_id).await?;
        self.require_effective_admin(actor, &membership).await?;

        let role = parse_role(input.role.as_str())
            .map_err(|message| AppError::InvalidFields(vec![message]))?;
        let previous_role = membership.role();
        let updated = self
            .memberships
            .update_membership_role(membership_id, role)
            .await?;

        self.append_audit(
            actor,
            AuditAction::MembershipUpdated,
            &updated,
            format!("changed role from '{previous_role}' to '{role}'"),
        )
        .await;
        self.dispatch(MembershipEvent::Updated, &updated, actor).await;

        Ok(updated)
    }

    /// Removes a membership and returns the deleted grant.
    pub async fn destroy(
        &self,
        actor: &UserIdentity,
        membership_id: MembershipId,
    ) -> AppResult<Membership> {
        let membership = self.load(membership_id).await?;
        self.require_effective_admin(actor, &membership).await?;

        self.memberships.delete_membership(membership_id).await?;

        self.append_audit(
            actor,
            AuditAction::MembershipRemoved,
            &membership,
            format!("removed '{}' from the membership list", membership.actor_id()),
        )
        .await;
        self.dispatch(MembershipEvent::Removed, &membership, actor)
            .await;

        Ok(membership)
    }

    async fn load(&self, membership_id: MembershipId) -> AppResult<Membership> {
        self.memberships
            .find_membership(membership_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("membership '{membership_id}' was not found"))
            })
    }

    async fn require_effective_admin(
        &self,
        actor: &UserIdentity,
        membership: &Membership,
    ) -> AppResult<()> {
        self.authorization_service
            .require_operation(
                actor,
                membership.target().into(),
                Operation::ManageMemberships,
            )
            .await
    }

    async fn validate_new_membership(
        &self,
        input: &CreateMembershipInput,
        target: MembershipTarget,
    ) -> AppResult<(ActorId, Role)> {
        let mut field_errors = Vec::new();

        let role = match parse_role(input.role.as_str()) {
            Ok(role) => Some(role),
            Err(message) => {
                field_errors.push(message);
                None
            }
        };

        let user_id = match ActorId::parse(input.user_id.as_str()) {
            Ok(user_id) => self
                .actors
                .find_actor(user_id)
                .await?
                .map(|profile| profile.actor_id),
            Err(_) => None,
        };
        if user_id.is_none() {
            field_errors.push("User must exist".to_owned());
        }

        if !self.target_exists(target).await? {
            field_errors.push(format!("{} must exist", target.kind()));
        }

        match (user_id, role) {
            (Some(user_id), Some(role)) if field_errors.is_empty() => Ok((user_id, role)),
            _ => Err(AppError::InvalidFields(field_errors)),
        }
    }

    async fn target_exists(&self, target: MembershipTarget) -> AppResult<bool> {
        Ok(match target {
            MembershipTarget::Project(project_id) => {
                self.resources.find_project(project_id).await?.is_some()
            }
            MembershipTarget::Component(component_id) => {
                self.resources.find_component(component_id).await?.is_some()
            }
        })
    }

    /// Records a committed change. A failed append is logged and never
    /// turns the committed write into an error.
    async fn append_audit(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        membership: &Membership,
        detail: String,
    ) {
        let result = self
            .audit_repository
            .append_event(AuditEvent {
                subject: actor.actor_id().to_string(),
                action,
                resource_type: "membership".to_owned(),
                resource_id: membership.id().to_string(),
                detail: Some(detail),
            })
            .await;

        if let Err(error) = result {
            warn!(
                action = action.as_str(),
                resource_id = %membership.id(),
                %error,
                "failed to append audit event"
            );
        }
    }
}

fn parse_target(input: &CreateMembershipInput) -> AppResult<MembershipTarget> {
    let mut field_errors = Vec::new();
    if input.membership_type.trim().is_empty() {
        field_errors.push("Membership type can't be blank".to_owned());
    }
    if input.membership_id.trim().is_empty() {
        field_errors.push("Membership can't be blank".to_owned());
    }
    if !field_errors.is_empty() {
        return Err(AppError::InvalidFields(field_errors));
    }

    MembershipTarget::from_transport(input.membership_type.trim(), input.membership_id.as_str())
        .map_err(|error| AppError::InvalidFields(vec![error.to_string()]))
}

fn parse_role(value: &str) -> Result<Role, String> {
    if value.trim().is_empty() {
        return Err("Role can't be blank".to_owned());
    }

    Role::from_transport(value)
        .map_err(|_| format!("Role '{}' is not included in the list", value.trim()))
}
