// db/userdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;

use crate::dtos::userdtos::UpdateProfileDto;
use crate::models::usermodel::{Profile, User, UserRole, UserWithCounts};

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, role, active, email_verified,
    verification_token, token_expires_at, created_at, updated_at
"#;

#[async_trait]
pub trait UserExt {
    /// Look a user up by exactly one of id, email or verification token.
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
        token: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    /// Insert a user together with its empty profile, atomically.
    async fn save_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
        verification_token: &str,
        token_expires_at: DateTime<Utc>,
    ) -> Result<User, sqlx::Error>;

    /// Remove a user row again (signup is all-or-nothing with respect to
    /// verification-mail delivery). The profile goes with it via cascade.
    async fn delete_user(&self, user_id: Uuid) -> Result<(), sqlx::Error>;

    /// Flip email_verified and void the expiry. The token value itself is
    /// kept so a repeated click on the link reads as "already verified"
    /// instead of "unknown token".
    async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), sqlx::Error>;

    /// Issue a fresh verification token for an unverified account.
    async fn set_verification_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error>;

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        fields: UpdateProfileDto,
    ) -> Result<Profile, sqlx::Error>;

    async fn get_users_with_counts(&self) -> Result<Vec<UserWithCounts>, sqlx::Error>;

    async fn deactivate_user(&self, user_id: Uuid) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
        token: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
            ))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
            ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(token) = token {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE verification_token = $1"
            ))
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
        verification_token: &str,
        token_expires_at: DateTime<Utc>,
    ) -> Result<User, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, role, verification_token, token_expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(verification_token)
        .bind(token_expires_at)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET email_verified = true,
                token_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_verification_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET verification_token = $2,
                token_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, business_name, website, location, niche, skills, bio, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        fields: UpdateProfileDto,
    ) -> Result<Profile, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET business_name = COALESCE($2, business_name),
                website = COALESCE($3, website),
                location = COALESCE($4, location),
                niche = COALESCE($5, niche),
                skills = COALESCE($6, skills),
                bio = COALESCE($7, bio),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING id, user_id, business_name, website, location, niche, skills, bio, updated_at
            "#,
        )
        .bind(user_id)
        .bind(fields.business_name)
        .bind(fields.website)
        .bind(fields.location)
        .bind(fields.niche)
        .bind(fields.skills)
        .bind(fields.bio)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_users_with_counts(&self) -> Result<Vec<UserWithCounts>, sqlx::Error> {
        sqlx::query_as::<_, UserWithCounts>(
            r#"
            SELECT u.id, u.name, u.email, u.role, u.active, u.email_verified, u.created_at,
                   (SELECT COUNT(*) FROM jobs j WHERE j.owner_id = u.id) AS job_count,
                   (SELECT COUNT(*) FROM proposals p WHERE p.freelancer_id = u.id) AS proposal_count
            FROM users u
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn deactivate_user(&self, user_id: Uuid) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET active = false, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}
