use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::{
    Api, Error, Result,
    mealplan::{MealPlan, MealPlanInput},
    recipe::{Recipe, RecipeInput},
    shopping::{GenerateInput, ShoppingList, ShoppingListInput},
};

const DETAIL_FIELDS: [&str; 4] = ["detail", "description", "error", "message"];

/// [`Api`] over the backend's REST endpoints.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Transport(format!(
                "unsupported url scheme: {}",
                base_url.scheme()
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Transport(format!("cannot extend base url {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn send<B>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        tracing::debug!(method = %method, url = %url, "api request");

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            tracing::error!(method = %method, url = %url, err = %err, "api request failed");
            Error::from(err)
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let err = error_from_response(response).await;
        tracing::warn!(method = %method, url = %url, err = %err, "api request rejected");

        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let response = self.send::<()>(Method::GET, segments, None).await?;
        decode(response).await
    }

    async fn write<T, B>(&self, method: Method, segments: &[&str], body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, segments, Some(body)).await?;
        decode(response).await
    }

    async fn remove(&self, segments: &[&str]) -> Result<()> {
        self.send::<()>(Method::DELETE, segments, None).await?;

        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;

    Ok(serde_json::from_slice(&body)?)
}

async fn error_from_response(response: Response) -> Error {
    let status = response.status().as_u16();
    let detail = response
        .bytes()
        .await
        .ok()
        .and_then(|body| detail_from_body(&body));

    Error::Status { status, detail }
}

fn detail_from_body(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;

    DETAIL_FIELDS
        .iter()
        .filter_map(|field| value.get(field)?.as_str())
        .find(|detail| !detail.trim().is_empty())
        .map(str::to_owned)
}

#[async_trait::async_trait]
impl Api for HttpApi {
    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.fetch(&["api", "recipes"]).await
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe> {
        self.fetch(&["api", "recipes", id]).await
    }

    async fn create_recipe(&self, input: &RecipeInput) -> Result<Recipe> {
        self.write(Method::POST, &["api", "recipes"], input).await
    }

    async fn update_recipe(&self, id: &str, input: &RecipeInput) -> Result<Recipe> {
        self.write(Method::PUT, &["api", "recipes", id], input).await
    }

    async fn delete_recipe(&self, id: &str) -> Result<()> {
        self.remove(&["api", "recipes", id]).await
    }

    async fn list_meal_plans(&self) -> Result<Vec<MealPlan>> {
        self.fetch(&["api", "meal-plans"]).await
    }

    async fn get_meal_plan(&self, id: &str) -> Result<MealPlan> {
        self.fetch(&["api", "meal-plans", id]).await
    }

    async fn create_meal_plan(&self, input: &MealPlanInput) -> Result<MealPlan> {
        self.write(Method::POST, &["api", "meal-plans"], input).await
    }

    async fn update_meal_plan(&self, id: &str, input: &MealPlanInput) -> Result<MealPlan> {
        self.write(Method::PUT, &["api", "meal-plans", id], input)
            .await
    }

    async fn delete_meal_plan(&self, id: &str) -> Result<()> {
        self.remove(&["api", "meal-plans", id]).await
    }

    async fn list_shopping_lists(&self) -> Result<Vec<ShoppingList>> {
        self.fetch(&["api", "shopping-lists"]).await
    }

    async fn create_shopping_list(&self, input: &GenerateInput) -> Result<ShoppingList> {
        self.write(Method::POST, &["api", "shopping-lists"], input)
            .await
    }

    async fn update_shopping_list(
        &self,
        id: &str,
        input: &ShoppingListInput,
    ) -> Result<ShoppingList> {
        self.write(Method::PUT, &["api", "shopping-lists", id], input)
            .await
    }

    async fn seed(&self) -> Result<()> {
        self.send::<()>(Method::POST, &["api", "test", "seed-db"], None)
            .await?;

        Ok(())
    }

    fn shopping_list_pdf_url(&self, meal_plan_id: &str) -> String {
        match self.endpoint(&["meal-plans", meal_plan_id, "shopping-list", "pdf"]) {
            Ok(url) => url.into(),
            Err(_) => format!(
                "{}/meal-plans/{}/shopping-list/pdf",
                self.base_url.as_str().trim_end_matches('/'),
                urlencoding::encode(meal_plan_id)
            ),
        }
    }
}
